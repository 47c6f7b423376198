use std::collections::BTreeMap;

use sea_orm::{QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    AllocationRecord, AssetPartnerships, AssetPosition, EngineError, MoneyCents, Partnership,
    PartnershipDetails, ResultEngine, UserPosition, cost_attributions, revenue_shares,
    share::available,
    util::parse_uuid,
};

use super::{Engine, with_tx};

impl Engine {
    /// Asset summary with its active partnerships and the share still free.
    pub async fn get_asset_partnerships(&self, asset_id: Uuid) -> ResultEngine<AssetPartnerships> {
        with_tx!(self, |db_tx| {
            let asset = self.require_asset(&db_tx, asset_id).await?;
            let partnerships = self.active_partnerships(&db_tx, asset_id).await?;
            let total_allocated: f64 = partnerships.iter().map(|p| p.share_percentage).sum();
            Ok(AssetPartnerships {
                asset,
                partnerships,
                total_allocated,
                available_percentage: available(total_allocated),
            })
        })
    }

    /// One partnership (active or not) with every allocation row it received
    /// on the asset and the derived totals.
    pub async fn get_partnership_details(
        &self,
        asset_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<PartnershipDetails> {
        with_tx!(self, |db_tx| {
            self.require_asset(&db_tx, asset_id).await?;
            let row = self
                .partnership_row(&db_tx, asset_id, user_id)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("partnership not exists".to_string()))?;
            let partnership = Partnership::try_from(row)?;

            let revenue_shares = revenue_shares::Entity::find()
                .filter(revenue_shares::Column::AssetId.eq(asset_id.to_string()))
                .filter(revenue_shares::Column::UserId.eq(user_id.to_string()))
                .order_by_asc(revenue_shares::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|row| {
                    Ok(AllocationRecord {
                        transaction_id: parse_uuid(&row.revenue_id, "revenue")?,
                        amount_minor: row.share_amount_minor,
                        percentage: row.percentage,
                        created_at: row.created_at,
                    })
                })
                .collect::<ResultEngine<Vec<_>>>()?;

            let cost_attributions = cost_attributions::Entity::find()
                .filter(cost_attributions::Column::AssetId.eq(asset_id.to_string()))
                .filter(cost_attributions::Column::UserId.eq(user_id.to_string()))
                .order_by_asc(cost_attributions::Column::CreatedAt)
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|row| {
                    Ok(AllocationRecord {
                        transaction_id: parse_uuid(&row.cost_id, "cost")?,
                        amount_minor: row.attributed_amount_minor,
                        percentage: row.percentage,
                        created_at: row.created_at,
                    })
                })
                .collect::<ResultEngine<Vec<_>>>()?;

            let total_revenue = MoneyCents::total(revenue_shares.iter().map(|r| r.amount_minor))?;
            let total_cost = MoneyCents::total(cost_attributions.iter().map(|r| r.amount_minor))?;
            Ok(PartnershipDetails {
                partnership,
                revenue_shares,
                cost_attributions,
                total_revenue_minor: total_revenue.minor(),
                total_cost_minor: total_cost.minor(),
                net_minor: total_revenue.try_sub(total_cost)?.minor(),
            })
        })
    }

    /// Net position of a user across all revenue shares and cost attributions.
    pub async fn user_position(&self, user_id: &str) -> ResultEngine<UserPosition> {
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;

            // asset_id -> (revenue, cost)
            let mut per_asset: BTreeMap<String, (MoneyCents, MoneyCents)> = BTreeMap::new();
            for row in revenue_shares::Entity::find()
                .filter(revenue_shares::Column::UserId.eq(user_id.to_string()))
                .all(&db_tx)
                .await?
            {
                let totals = per_asset.entry(row.asset_id).or_default();
                totals.0 = totals.0.try_add(row.share_amount_minor.into())?;
            }
            for row in cost_attributions::Entity::find()
                .filter(cost_attributions::Column::UserId.eq(user_id.to_string()))
                .all(&db_tx)
                .await?
            {
                let totals = per_asset.entry(row.asset_id).or_default();
                totals.1 = totals.1.try_add(row.attributed_amount_minor.into())?;
            }

            let assets = per_asset
                .into_iter()
                .map(|(asset_id, (revenue, cost))| {
                    Ok(AssetPosition {
                        asset_id: parse_uuid(&asset_id, "asset")?,
                        total_revenue_minor: revenue.minor(),
                        total_cost_minor: cost.minor(),
                        net_minor: revenue.try_sub(cost)?.minor(),
                    })
                })
                .collect::<ResultEngine<Vec<_>>>()?;

            let total_revenue = MoneyCents::total(assets.iter().map(|a| a.total_revenue_minor))?;
            let total_cost = MoneyCents::total(assets.iter().map(|a| a.total_cost_minor))?;
            Ok(UserPosition {
                user_id: user_id.to_string(),
                assets,
                total_revenue_minor: total_revenue.minor(),
                total_cost_minor: total_cost.minor(),
                net_minor: total_revenue.try_sub(total_cost)?.minor(),
            })
        })
    }
}
