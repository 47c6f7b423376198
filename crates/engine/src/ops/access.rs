use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{Asset, EngineError, ResultEngine, asset_partnerships, assets, banks, companies, users};

use super::Engine;

impl Engine {
    pub(super) async fn require_user_exists(
        &self,
        db: &DatabaseTransaction,
        username: &str,
    ) -> ResultEngine<()> {
        let exists = users::Entity::find_by_id(username.to_string())
            .one(db)
            .await?
            .is_some();
        if !exists {
            return Err(EngineError::KeyNotFound("user not exists".to_string()));
        }
        Ok(())
    }

    /// Loads a live (not soft-deleted) asset.
    pub(super) async fn require_asset(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
    ) -> ResultEngine<Asset> {
        let model = assets::Entity::find_by_id(asset_id.to_string())
            .filter(assets::Column::DeletedAt.is_null())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("asset not exists".to_string()))?;
        Asset::try_from(model)
    }

    pub(super) async fn require_asset_owner(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Asset> {
        let asset = self.require_asset(db, asset_id).await?;
        if asset.owner_id != user_id {
            return Err(EngineError::KeyNotFound("asset not exists".to_string()));
        }
        Ok(asset)
    }

    /// Owner or active partner.
    pub(super) async fn require_asset_access(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Asset> {
        let asset = self.require_asset(db, asset_id).await?;
        if asset.owner_id == user_id {
            return Ok(asset);
        }
        let active = self
            .partnership_row(db, asset_id, user_id)
            .await?
            .is_some_and(|row| row.is_active);
        if !active {
            return Err(EngineError::KeyNotFound("asset not exists".to_string()));
        }
        Ok(asset)
    }

    pub(super) async fn partnership_row(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Option<asset_partnerships::Model>> {
        asset_partnerships::Entity::find_by_id((asset_id.to_string(), user_id.to_string()))
            .one(db)
            .await
            .map_err(Into::into)
    }

    pub(super) async fn require_company_owner(
        &self,
        db: &DatabaseTransaction,
        company_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<companies::Model> {
        companies::Entity::find_by_id(company_id.to_string())
            .filter(companies::Column::OwnerId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("company not exists".to_string()))
    }

    pub(super) async fn require_bank_owner(
        &self,
        db: &DatabaseTransaction,
        bank_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<banks::Model> {
        banks::Entity::find_by_id(bank_id.to_string())
            .filter(banks::Column::OwnerId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("bank not exists".to_string()))
    }
}
