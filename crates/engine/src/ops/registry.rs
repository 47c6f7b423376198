//! Users, companies, banks and assets.
//!
//! Plain CRUD around the partnership core; the core only relies on assets
//! existing and on who owns them.

use chrono::Utc;
use sea_orm::{
    ActiveValue, Condition, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::{
    Asset, EngineError, NewAssetCmd, ResultEngine, asset_partnerships, assets, banks, companies,
    users,
    util::{normalize_required_name, parse_uuid},
};

use super::{Engine, with_tx};

impl Engine {
    /// Register a user. The username is the user id.
    pub async fn new_user(&self, username: &str, password: &str) -> ResultEngine<()> {
        let username = normalize_required_name(username, "user")?;
        if password.is_empty() {
            return Err(EngineError::Validation(
                "password must not be empty".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            if users::Entity::find_by_id(username.clone())
                .one(&db_tx)
                .await?
                .is_some()
            {
                return Err(EngineError::ExistingKey(username));
            }
            users::ActiveModel {
                username: ActiveValue::Set(username.clone()),
                password: ActiveValue::Set(password.to_string()),
            }
            .insert(&db_tx)
            .await?;
            Ok(())
        })
    }

    /// Add a company owned by `user_id`.
    pub async fn new_company(&self, name: &str, user_id: &str) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "company")?;
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            let exists = companies::Entity::find()
                .filter(companies::Column::OwnerId.eq(user_id.to_string()))
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let id = Uuid::new_v4();
            companies::ActiveModel {
                id: ActiveValue::Set(id.to_string()),
                name: ActiveValue::Set(name.clone()),
                owner_id: ActiveValue::Set(user_id.to_string()),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;
            Ok(id)
        })
    }

    /// Add a bank owned by `user_id`.
    pub async fn new_bank(&self, name: &str, user_id: &str) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "bank")?;
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            let exists = banks::Entity::find()
                .filter(banks::Column::OwnerId.eq(user_id.to_string()))
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .one(&db_tx)
                .await?
                .is_some();
            if exists {
                return Err(EngineError::ExistingKey(name));
            }

            let id = Uuid::new_v4();
            banks::ActiveModel {
                id: ActiveValue::Set(id.to_string()),
                name: ActiveValue::Set(name.clone()),
                owner_id: ActiveValue::Set(user_id.to_string()),
                created_at: ActiveValue::Set(Utc::now()),
            }
            .insert(&db_tx)
            .await?;
            Ok(id)
        })
    }

    /// Add a new asset. The company (and the bank, if any) must belong to the
    /// owner.
    pub async fn new_asset(&self, cmd: NewAssetCmd) -> ResultEngine<Uuid> {
        let name = normalize_required_name(&cmd.name, "asset")?;
        let kind = normalize_required_name(&cmd.kind, "asset type")?;
        if cmd.value_minor.is_some_and(|value| value < 0) {
            return Err(EngineError::Validation(
                "asset value must be >= 0".to_string(),
            ));
        }
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, &cmd.owner_id).await?;
            self.require_company_owner(&db_tx, cmd.company_id, &cmd.owner_id)
                .await?;
            if let Some(bank_id) = cmd.bank_id {
                self.require_bank_owner(&db_tx, bank_id, &cmd.owner_id)
                    .await?;
            }

            let asset = Asset::new(
                name,
                kind,
                cmd.value_minor,
                cmd.company_id,
                cmd.bank_id,
                &cmd.owner_id,
            );
            assets::ActiveModel::from(&asset).insert(&db_tx).await?;
            tracing::info!(asset_id = %asset.id, owner = %asset.owner_id, "asset created");
            Ok(asset.id)
        })
    }

    /// Return an asset visible to `user_id` (owner or active partner).
    pub async fn asset(&self, asset_id: Uuid, user_id: &str) -> ResultEngine<Asset> {
        with_tx!(self, |db_tx| {
            self.require_asset_access(&db_tx, asset_id, user_id).await
        })
    }

    /// List the live assets `user_id` owns or actively partners in.
    pub async fn list_assets(&self, user_id: &str) -> ResultEngine<Vec<Asset>> {
        with_tx!(self, |db_tx| {
            let partnered: Vec<String> = asset_partnerships::Entity::find()
                .filter(asset_partnerships::Column::UserId.eq(user_id.to_string()))
                .filter(asset_partnerships::Column::IsActive.eq(true))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|row| row.asset_id)
                .collect();

            let models = assets::Entity::find()
                .filter(assets::Column::DeletedAt.is_null())
                .filter(
                    Condition::any()
                        .add(assets::Column::OwnerId.eq(user_id.to_string()))
                        .add(assets::Column::Id.is_in(partnered)),
                )
                .order_by_asc(assets::Column::Name)
                .all(&db_tx)
                .await?;
            models.into_iter().map(Asset::try_from).collect()
        })
    }

    /// Soft-delete an asset (owner-only). History stays in place.
    pub async fn delete_asset(&self, asset_id: Uuid, user_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let asset = self.require_asset_owner(&db_tx, asset_id, user_id).await?;
            assets::ActiveModel {
                id: ActiveValue::Set(asset.id.to_string()),
                deleted_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            tracing::info!(asset_id = %asset.id, "asset deleted");
            Ok(())
        })
    }

    /// Resolve a company id by name for `user_id` (case-insensitive).
    pub async fn company_by_name(&self, name: &str, user_id: &str) -> ResultEngine<Uuid> {
        let name = normalize_required_name(name, "company")?;
        with_tx!(self, |db_tx| {
            let model = companies::Entity::find()
                .filter(companies::Column::OwnerId.eq(user_id.to_string()))
                .filter(Expr::cust("LOWER(name)").eq(name.to_lowercase()))
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("company not exists".to_string()))?;
            parse_uuid(&model.id, "company")
        })
    }
}
