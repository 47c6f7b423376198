//! Transaction primitives.
//!
//! A revenue or a cost is recorded once against an asset and carries the
//! allocation rows computed at that moment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Allocation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Revenue,
    Cost,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::Cost => "cost",
        }
    }
}

/// A revenue/cost as persisted, with its frozen split.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub asset_id: Uuid,
    pub amount_minor: i64,
    /// Revenue source or cost category.
    pub label: Option<String>,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
    /// The user who recorded the revenue or incurred the cost.
    pub recorder_id: String,
    pub allocations: Vec<Allocation>,
}
