//! Partnership store: active shares of an asset and their mutations.
//!
//! Every mutation that can raise the active total re-reads the other active
//! shares inside its own transaction before writing.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Asset, EngineError, Partnership, ResultEngine, asset_partnerships,
    share::{exceeds_cap, validate_share},
};

use super::{Engine, with_tx};

/// Error raised when a share would push `asset` to `total` percent.
pub(super) fn capacity_exceeded(asset: &Asset, total: f64) -> EngineError {
    EngineError::CapacityExceeded(format!(
        "asset '{}' would be {total:.2}% allocated",
        asset.name
    ))
}

impl Engine {
    /// Active partnerships of an asset, largest share first.
    pub(super) async fn active_partnerships(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
    ) -> ResultEngine<Vec<Partnership>> {
        asset_partnerships::Entity::find()
            .filter(asset_partnerships::Column::AssetId.eq(asset_id.to_string()))
            .filter(asset_partnerships::Column::IsActive.eq(true))
            .order_by_desc(asset_partnerships::Column::SharePercentage)
            .order_by_asc(asset_partnerships::Column::UserId)
            .all(db)
            .await?
            .into_iter()
            .map(Partnership::try_from)
            .collect()
    }

    /// Sum of the active shares of an asset, optionally leaving one user out.
    pub(super) async fn active_share_total(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
        excluding: Option<&str>,
    ) -> ResultEngine<f64> {
        let rows = self.active_partnerships(db, asset_id).await?;
        Ok(rows
            .iter()
            .filter(|row| excluding != Some(row.user_id.as_str()))
            .map(|row| row.share_percentage)
            .sum())
    }

    /// Insert an active partnership, or reactivate the existing row for the
    /// pair with the new share.
    pub(super) async fn upsert_active_partnership(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
        user_id: &str,
        share_percentage: f64,
        now: DateTime<Utc>,
    ) -> ResultEngine<Partnership> {
        let mut partnership = Partnership::new(asset_id, user_id, share_percentage);
        partnership.joined_at = now;
        let active = asset_partnerships::ActiveModel::from(&partnership);

        match self.partnership_row(db, asset_id, user_id).await? {
            Some(_) => {
                active.update(db).await?;
            }
            None => {
                active.insert(db).await?;
            }
        }
        Ok(partnership)
    }

    async fn require_partnership(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<Partnership> {
        let row = self
            .partnership_row(db, asset_id, user_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("partnership not exists".to_string()))?;
        Partnership::try_from(row)
    }

    /// Lists the active partnerships of an asset, largest share first.
    pub async fn list_active_partnerships(&self, asset_id: Uuid) -> ResultEngine<Vec<Partnership>> {
        with_tx!(self, |db_tx| {
            self.require_asset(&db_tx, asset_id).await?;
            self.active_partnerships(&db_tx, asset_id).await
        })
    }

    /// Changes the share of an existing partnership (owner-only).
    ///
    /// For an active partnership the new share is checked against the other
    /// active partners first; historical allocations are left untouched.
    pub async fn update_partnership(
        &self,
        asset_id: Uuid,
        user_id: &str,
        share_percentage: f64,
        acting_user_id: &str,
    ) -> ResultEngine<Partnership> {
        let share_percentage = validate_share(share_percentage)?;
        with_tx!(self, |db_tx| {
            let asset = self
                .require_asset_owner(&db_tx, asset_id, acting_user_id)
                .await?;
            let mut partnership = self.require_partnership(&db_tx, asset_id, user_id).await?;

            if partnership.is_active {
                let others = self
                    .active_share_total(&db_tx, asset_id, Some(user_id))
                    .await?;
                let total = others + share_percentage;
                if exceeds_cap(total) {
                    return Err(capacity_exceeded(&asset, total));
                }
            }

            asset_partnerships::ActiveModel {
                asset_id: ActiveValue::Set(asset_id.to_string()),
                user_id: ActiveValue::Set(user_id.to_string()),
                share_percentage: ActiveValue::Set(share_percentage),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            tracing::info!(
                %asset_id,
                user_id,
                from = partnership.share_percentage,
                to = share_percentage,
                "partnership share updated"
            );
            partnership.share_percentage = share_percentage;
            Ok(partnership)
        })
    }

    /// Deactivates a partnership. The owner can remove any partner and a
    /// partner can leave on their own; the asset owner cannot be removed.
    pub async fn deactivate_partnership(
        &self,
        asset_id: Uuid,
        user_id: &str,
        acting_user_id: &str,
    ) -> ResultEngine<Partnership> {
        with_tx!(self, |db_tx| {
            let asset = self.require_asset(&db_tx, asset_id).await?;
            if asset.owner_id != acting_user_id && user_id != acting_user_id {
                return Err(EngineError::KeyNotFound("asset not exists".to_string()));
            }
            if user_id == asset.owner_id {
                return Err(EngineError::Validation(
                    "cannot remove asset owner".to_string(),
                ));
            }

            let mut partnership = self.require_partnership(&db_tx, asset_id, user_id).await?;
            if !partnership.is_active {
                return Err(EngineError::InvalidState(
                    "partnership already inactive".to_string(),
                ));
            }

            let left_at = Utc::now();
            asset_partnerships::ActiveModel {
                asset_id: ActiveValue::Set(asset_id.to_string()),
                user_id: ActiveValue::Set(user_id.to_string()),
                is_active: ActiveValue::Set(false),
                left_at: ActiveValue::Set(Some(left_at)),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;

            tracing::info!(%asset_id, user_id, "partnership deactivated");
            partnership.is_active = false;
            partnership.left_at = Some(left_at);
            Ok(partnership)
        })
    }

    /// Reactivates a previously deactivated partnership with its last share
    /// (owner-only), reusing the existing row.
    pub async fn reactivate_partnership(
        &self,
        asset_id: Uuid,
        user_id: &str,
        acting_user_id: &str,
    ) -> ResultEngine<Partnership> {
        with_tx!(self, |db_tx| {
            let asset = self
                .require_asset_owner(&db_tx, asset_id, acting_user_id)
                .await?;
            let partnership = self.require_partnership(&db_tx, asset_id, user_id).await?;
            if partnership.is_active {
                return Err(EngineError::InvalidState(
                    "partnership already active".to_string(),
                ));
            }

            let others = self.active_share_total(&db_tx, asset_id, None).await?;
            let total = others + partnership.share_percentage;
            if exceeds_cap(total) {
                return Err(capacity_exceeded(&asset, total));
            }

            let partnership = self
                .upsert_active_partnership(
                    &db_tx,
                    asset_id,
                    user_id,
                    partnership.share_percentage,
                    Utc::now(),
                )
                .await?;
            tracing::info!(%asset_id, user_id, "partnership reactivated");
            Ok(partnership)
        })
    }
}
