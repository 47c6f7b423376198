//! Initial schema.
//!
//! - `users`: authentication
//! - `companies`, `banks`: registries assets are attached to
//! - `assets`: shareable things with an owner
//! - `asset_partnerships`: share of an asset held by a user
//! - `partnership_invitations`: offers of a share, with their lifecycle
//! - `revenues`, `costs`: money recorded on an asset
//! - `revenue_shares`, `cost_attributions`: per-user split frozen at recording time

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    Name,
    OwnerId,
    CreatedAt,
}

#[derive(Iden)]
enum Banks {
    Table,
    Id,
    Name,
    OwnerId,
    CreatedAt,
}

#[derive(Iden)]
enum Assets {
    Table,
    Id,
    Name,
    Kind,
    ValueMinor,
    CompanyId,
    BankId,
    OwnerId,
    CreatedAt,
    DeletedAt,
}

#[derive(Iden)]
enum AssetPartnerships {
    Table,
    AssetId,
    UserId,
    SharePercentage,
    IsActive,
    JoinedAt,
    LeftAt,
}

#[derive(Iden)]
enum PartnershipInvitations {
    Table,
    Id,
    AssetId,
    SenderId,
    ReceiverId,
    SharePercentage,
    Message,
    Status,
    StatusReason,
    CreatedAt,
    ExpiresAt,
    RespondedAt,
}

#[derive(Iden)]
enum Revenues {
    Table,
    Id,
    AssetId,
    AmountMinor,
    Source,
    Note,
    OccurredAt,
    RecordedBy,
    CreatedAt,
}

#[derive(Iden)]
enum Costs {
    Table,
    Id,
    AssetId,
    AmountMinor,
    Category,
    Note,
    OccurredAt,
    IncurredBy,
    CreatedAt,
}

#[derive(Iden)]
enum RevenueShares {
    Table,
    Id,
    RevenueId,
    AssetId,
    UserId,
    ShareAmountMinor,
    Percentage,
    CreatedAt,
}

#[derive(Iden)]
enum CostAttributions {
    Table,
    Id,
    CostId,
    AssetId,
    UserId,
    AttributedAmountMinor,
    Percentage,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Companies and banks
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::OwnerId).string().not_null())
                    .col(
                        ColumnDef::new(Companies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-companies-owner_id")
                            .from(Companies::Table, Companies::OwnerId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Banks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Banks::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Banks::Name).string().not_null())
                    .col(ColumnDef::new(Banks::OwnerId).string().not_null())
                    .col(
                        ColumnDef::new(Banks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-banks-owner_id")
                            .from(Banks::Table, Banks::OwnerId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Assets
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Assets::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Assets::Name).string().not_null())
                    .col(ColumnDef::new(Assets::Kind).string().not_null())
                    .col(ColumnDef::new(Assets::ValueMinor).big_integer())
                    .col(ColumnDef::new(Assets::CompanyId).string().not_null())
                    .col(ColumnDef::new(Assets::BankId).string())
                    .col(ColumnDef::new(Assets::OwnerId).string().not_null())
                    .col(
                        ColumnDef::new(Assets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assets::DeletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assets-company_id")
                            .from(Assets::Table, Assets::CompanyId)
                            .to(Companies::Table, Companies::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assets-bank_id")
                            .from(Assets::Table, Assets::BankId)
                            .to(Banks::Table, Banks::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assets-owner_id")
                            .from(Assets::Table, Assets::OwnerId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-assets-owner_id")
                    .table(Assets::Table)
                    .col(Assets::OwnerId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Partnerships
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(AssetPartnerships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssetPartnerships::AssetId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssetPartnerships::UserId).string().not_null())
                    .col(
                        ColumnDef::new(AssetPartnerships::SharePercentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AssetPartnerships::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(AssetPartnerships::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AssetPartnerships::LeftAt).timestamp_with_time_zone())
                    .primary_key(
                        Index::create()
                            .col(AssetPartnerships::AssetId)
                            .col(AssetPartnerships::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-asset_partnerships-asset_id")
                            .from(AssetPartnerships::Table, AssetPartnerships::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-asset_partnerships-user_id")
                            .from(AssetPartnerships::Table, AssetPartnerships::UserId)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-asset_partnerships-user_id")
                    .table(AssetPartnerships::Table)
                    .col(AssetPartnerships::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Invitations
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PartnershipInvitations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PartnershipInvitations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PartnershipInvitations::AssetId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipInvitations::SenderId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipInvitations::ReceiverId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipInvitations::SharePercentage)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PartnershipInvitations::Message).string())
                    .col(
                        ColumnDef::new(PartnershipInvitations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(PartnershipInvitations::StatusReason).string())
                    .col(
                        ColumnDef::new(PartnershipInvitations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipInvitations::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PartnershipInvitations::RespondedAt)
                            .timestamp_with_time_zone(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-partnership_invitations-asset_id")
                            .from(PartnershipInvitations::Table, PartnershipInvitations::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-partnership_invitations-sender_id")
                            .from(PartnershipInvitations::Table, PartnershipInvitations::SenderId)
                            .to(Users::Table, Users::Username),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-partnership_invitations-receiver_id")
                            .from(
                                PartnershipInvitations::Table,
                                PartnershipInvitations::ReceiverId,
                            )
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-partnership_invitations-receiver_status")
                    .table(PartnershipInvitations::Table)
                    .col(PartnershipInvitations::ReceiverId)
                    .col(PartnershipInvitations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-partnership_invitations-asset_id")
                    .table(PartnershipInvitations::Table)
                    .col(PartnershipInvitations::AssetId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Revenues and their shares
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Revenues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Revenues::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Revenues::AssetId).string().not_null())
                    .col(ColumnDef::new(Revenues::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Revenues::Source).string())
                    .col(ColumnDef::new(Revenues::Note).string())
                    .col(
                        ColumnDef::new(Revenues::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Revenues::RecordedBy).string().not_null())
                    .col(
                        ColumnDef::new(Revenues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-revenues-asset_id")
                            .from(Revenues::Table, Revenues::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-revenues-recorded_by")
                            .from(Revenues::Table, Revenues::RecordedBy)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-revenues-asset_occurred")
                    .table(Revenues::Table)
                    .col(Revenues::AssetId)
                    .col(Revenues::OccurredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RevenueShares::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RevenueShares::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RevenueShares::RevenueId).string().not_null())
                    .col(ColumnDef::new(RevenueShares::AssetId).string().not_null())
                    .col(ColumnDef::new(RevenueShares::UserId).string().not_null())
                    .col(
                        ColumnDef::new(RevenueShares::ShareAmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RevenueShares::Percentage).double().not_null())
                    .col(
                        ColumnDef::new(RevenueShares::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-revenue_shares-revenue_id")
                            .from(RevenueShares::Table, RevenueShares::RevenueId)
                            .to(Revenues::Table, Revenues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-revenue_shares-user_id")
                            .from(RevenueShares::Table, RevenueShares::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-revenue_shares-user_asset")
                    .table(RevenueShares::Table)
                    .col(RevenueShares::UserId)
                    .col(RevenueShares::AssetId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 7. Costs and their attributions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Costs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Costs::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Costs::AssetId).string().not_null())
                    .col(ColumnDef::new(Costs::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Costs::Category).string())
                    .col(ColumnDef::new(Costs::Note).string())
                    .col(
                        ColumnDef::new(Costs::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Costs::IncurredBy).string().not_null())
                    .col(
                        ColumnDef::new(Costs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-costs-asset_id")
                            .from(Costs::Table, Costs::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-costs-incurred_by")
                            .from(Costs::Table, Costs::IncurredBy)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-costs-asset_occurred")
                    .table(Costs::Table)
                    .col(Costs::AssetId)
                    .col(Costs::OccurredAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CostAttributions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CostAttributions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CostAttributions::CostId).string().not_null())
                    .col(ColumnDef::new(CostAttributions::AssetId).string().not_null())
                    .col(ColumnDef::new(CostAttributions::UserId).string().not_null())
                    .col(
                        ColumnDef::new(CostAttributions::AttributedAmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CostAttributions::Percentage)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CostAttributions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cost_attributions-cost_id")
                            .from(CostAttributions::Table, CostAttributions::CostId)
                            .to(Costs::Table, Costs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cost_attributions-user_id")
                            .from(CostAttributions::Table, CostAttributions::UserId)
                            .to(Users::Table, Users::Username),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cost_attributions-user_asset")
                    .table(CostAttributions::Table)
                    .col(CostAttributions::UserId)
                    .col(CostAttributions::AssetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse order of creation
        manager
            .drop_table(Table::drop().table(CostAttributions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Costs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RevenueShares::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Revenues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PartnershipInvitations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssetPartnerships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Banks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
