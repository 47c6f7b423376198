//! Recording revenues and costs together with their allocation rows.

use std::collections::HashSet;

use chrono::Utc;
use sea_orm::{ActiveValue, DatabaseTransaction, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Allocation, CostCmd, EngineError, ResultEngine, RevenueCmd, Transaction, TransactionKind,
    allocation::{split_by_shares, split_equally},
    cost_attributions, costs, revenue_shares, revenues,
    money::ensure_recordable_amount,
    util::normalize_optional_text,
};

use super::{Engine, with_tx};

impl Engine {
    /// Compute the split of a new transaction from the current partnership
    /// state. Must run in the transaction that inserts the parent row.
    async fn allocate(
        &self,
        db: &DatabaseTransaction,
        kind: TransactionKind,
        asset_id: Uuid,
        amount_minor: i64,
        recorder_id: &str,
        explicit_user_ids: Option<&[String]>,
    ) -> ResultEngine<Vec<Allocation>> {
        let active = self.active_partnerships(db, asset_id).await?;

        if let Some(user_ids) = explicit_user_ids {
            let partners: HashSet<&str> = active.iter().map(|p| p.user_id.as_str()).collect();
            if let Some(outsider) = user_ids.iter().find(|id| !partners.contains(id.as_str())) {
                return Err(EngineError::Validation(format!(
                    "invalid attribution users: '{outsider}' is not an active partner"
                )));
            }
            return split_equally(amount_minor, user_ids, recorder_id);
        }

        split_by_shares(
            amount_minor,
            active
                .iter()
                .map(|p| (p.user_id.as_str(), p.share_percentage)),
            recorder_id,
        )
        .inspect_err(|err| {
            if let EngineError::Consistency(_) = err {
                tracing::warn!(
                    %asset_id,
                    kind = kind.as_str(),
                    "refusing to allocate on inconsistent partnership data: {err}"
                );
            }
        })
    }

    /// Record a revenue and split it among the active partners of the asset.
    ///
    /// Any share left unallocated goes to the recorder.
    pub async fn record_revenue(&self, cmd: RevenueCmd) -> ResultEngine<Transaction> {
        let amount_minor = ensure_recordable_amount(cmd.amount_minor)?.minor();
        let source = normalize_optional_text(cmd.source.as_deref());
        let note = normalize_optional_text(cmd.note.as_deref());

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, &cmd.recorder_id).await?;
            self.require_asset_access(&db_tx, cmd.asset_id, &cmd.recorder_id)
                .await?;
            let allocations = self
                .allocate(
                    &db_tx,
                    TransactionKind::Revenue,
                    cmd.asset_id,
                    amount_minor,
                    &cmd.recorder_id,
                    None,
                )
                .await?;

            let id = Uuid::new_v4();
            let created_at = Utc::now();
            revenues::ActiveModel {
                id: ActiveValue::Set(id.to_string()),
                asset_id: ActiveValue::Set(cmd.asset_id.to_string()),
                amount_minor: ActiveValue::Set(amount_minor),
                source: ActiveValue::Set(source.clone()),
                note: ActiveValue::Set(note.clone()),
                occurred_at: ActiveValue::Set(cmd.occurred_at),
                recorded_by: ActiveValue::Set(cmd.recorder_id.clone()),
                created_at: ActiveValue::Set(created_at),
            }
            .insert(&db_tx)
            .await?;

            for allocation in &allocations {
                revenue_shares::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4().to_string()),
                    revenue_id: ActiveValue::Set(id.to_string()),
                    asset_id: ActiveValue::Set(cmd.asset_id.to_string()),
                    user_id: ActiveValue::Set(allocation.user_id.clone()),
                    share_amount_minor: ActiveValue::Set(allocation.amount_minor),
                    percentage: ActiveValue::Set(allocation.percentage),
                    created_at: ActiveValue::Set(created_at),
                }
                .insert(&db_tx)
                .await?;
            }

            tracing::info!(
                revenue_id = %id,
                asset_id = %cmd.asset_id,
                amount_minor,
                rows = allocations.len(),
                "revenue recorded"
            );
            Ok(Transaction {
                id,
                kind: TransactionKind::Revenue,
                asset_id: cmd.asset_id,
                amount_minor,
                label: source,
                note,
                occurred_at: cmd.occurred_at,
                recorder_id: cmd.recorder_id.clone(),
                allocations,
            })
        })
    }

    /// Record a cost on an asset.
    ///
    /// By default the cost is split like a revenue. With an explicit list of
    /// users it is split equally among them instead; every listed user must be
    /// an active partner.
    pub async fn record_cost(&self, cmd: CostCmd) -> ResultEngine<Transaction> {
        let amount_minor = ensure_recordable_amount(cmd.amount_minor)?.minor();
        let category = normalize_optional_text(cmd.category.as_deref());
        let note = normalize_optional_text(cmd.note.as_deref());

        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, &cmd.recorder_id).await?;
            self.require_asset_access(&db_tx, cmd.asset_id, &cmd.recorder_id)
                .await?;
            let allocations = self
                .allocate(
                    &db_tx,
                    TransactionKind::Cost,
                    cmd.asset_id,
                    amount_minor,
                    &cmd.recorder_id,
                    cmd.attributed_to.as_deref(),
                )
                .await?;

            let id = Uuid::new_v4();
            let created_at = Utc::now();
            costs::ActiveModel {
                id: ActiveValue::Set(id.to_string()),
                asset_id: ActiveValue::Set(cmd.asset_id.to_string()),
                amount_minor: ActiveValue::Set(amount_minor),
                category: ActiveValue::Set(category.clone()),
                note: ActiveValue::Set(note.clone()),
                occurred_at: ActiveValue::Set(cmd.occurred_at),
                incurred_by: ActiveValue::Set(cmd.recorder_id.clone()),
                created_at: ActiveValue::Set(created_at),
            }
            .insert(&db_tx)
            .await?;

            for allocation in &allocations {
                cost_attributions::ActiveModel {
                    id: ActiveValue::Set(Uuid::new_v4().to_string()),
                    cost_id: ActiveValue::Set(id.to_string()),
                    asset_id: ActiveValue::Set(cmd.asset_id.to_string()),
                    user_id: ActiveValue::Set(allocation.user_id.clone()),
                    attributed_amount_minor: ActiveValue::Set(allocation.amount_minor),
                    percentage: ActiveValue::Set(allocation.percentage),
                    created_at: ActiveValue::Set(created_at),
                }
                .insert(&db_tx)
                .await?;
            }

            tracing::info!(
                cost_id = %id,
                asset_id = %cmd.asset_id,
                amount_minor,
                rows = allocations.len(),
                explicit = cmd.attributed_to.is_some(),
                "cost recorded"
            );
            Ok(Transaction {
                id,
                kind: TransactionKind::Cost,
                asset_id: cmd.asset_id,
                amount_minor,
                label: category,
                note,
                occurred_at: cmd.occurred_at,
                recorder_id: cmd.recorder_id.clone(),
                allocations,
            })
        })
    }
}
