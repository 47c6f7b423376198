//! Read models returned by the partnership queries.
//!
//! Each query returns a flat record with exactly the data it joins, instead of
//! nested entity graphs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Asset, Partnership};

/// Partnerships of an asset and how much of it is still free.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetPartnerships {
    pub asset: Asset,
    /// Active partnerships, largest share first.
    pub partnerships: Vec<Partnership>,
    pub total_allocated: f64,
    pub available_percentage: f64,
}

/// One frozen allocation row of a revenue or a cost.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllocationRecord {
    /// Id of the revenue or cost the row belongs to.
    pub transaction_id: Uuid,
    pub amount_minor: i64,
    pub percentage: f64,
    pub created_at: DateTime<Utc>,
}

/// A single partnership with everything it has been allocated so far.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartnershipDetails {
    pub partnership: Partnership,
    pub revenue_shares: Vec<AllocationRecord>,
    pub cost_attributions: Vec<AllocationRecord>,
    pub total_revenue_minor: i64,
    pub total_cost_minor: i64,
    pub net_minor: i64,
}

/// Totals of one user on one asset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPosition {
    pub asset_id: Uuid,
    pub total_revenue_minor: i64,
    pub total_cost_minor: i64,
    pub net_minor: i64,
}

/// Net position of a user across every asset they were allocated on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPosition {
    pub user_id: String,
    /// Per-asset totals, ordered by asset id.
    pub assets: Vec<AssetPosition>,
    pub total_revenue_minor: i64,
    pub total_cost_minor: i64,
    pub net_minor: i64,
}
