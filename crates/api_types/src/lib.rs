use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod asset {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BankNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Created {
        pub id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetNew {
        pub name: String,
        /// Free-form asset type (`account`, `real_estate`, ...).
        pub kind: String,
        pub company_id: Uuid,
        pub bank_id: Option<Uuid>,
        pub value_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetView {
        pub id: Uuid,
        pub name: String,
        pub kind: String,
        pub value_minor: Option<i64>,
        pub company_id: Uuid,
        pub bank_id: Option<Uuid>,
        pub owner_id: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetListResponse {
        pub assets: Vec<AssetView>,
    }
}

pub mod partnership {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartnershipView {
        pub user_id: String,
        pub share_percentage: f64,
        pub is_active: bool,
        pub joined_at: DateTime<Utc>,
        pub left_at: Option<DateTime<Utc>>,
    }

    /// Request body for changing the share of a partner (owner-only).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartnershipUpdate {
        pub share_percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetPartnershipsResponse {
        pub asset: asset::AssetView,
        pub partnerships: Vec<PartnershipView>,
        pub total_allocated: f64,
        pub available_percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AllocationRecordView {
        pub transaction_id: Uuid,
        pub amount_minor: i64,
        pub percentage: f64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PartnershipDetailsResponse {
        pub partnership: PartnershipView,
        pub revenue_shares: Vec<AllocationRecordView>,
        pub cost_attributions: Vec<AllocationRecordView>,
        pub total_revenue_minor: i64,
        pub total_cost_minor: i64,
        pub net_minor: i64,
    }
}

pub mod invitation {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum InvitationStatus {
        Pending,
        Accepted,
        Rejected,
        Expired,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitationNew {
        pub asset_id: Uuid,
        pub receiver_id: String,
        /// In (0, 100].
        pub share_percentage: f64,
        pub message: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitationView {
        pub id: Uuid,
        pub asset_id: Uuid,
        pub sender_id: String,
        pub receiver_id: String,
        pub share_percentage: f64,
        pub message: Option<String>,
        pub status: InvitationStatus,
        pub status_reason: Option<String>,
        pub created_at: DateTime<Utc>,
        pub expires_at: DateTime<Utc>,
        pub responded_at: Option<DateTime<Utc>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitationListResponse {
        pub invitations: Vec<InvitationView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InvitationResponseView {
        pub invitation: InvitationView,
        /// Present when the invitation was accepted.
        pub partnership: Option<partnership::PartnershipView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Revenue,
        Cost,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RevenueNew {
        pub asset_id: Uuid,
        /// Must be > 0.
        pub amount_minor: i64,
        pub source: Option<String>,
        pub note: Option<String>,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CostNew {
        pub asset_id: Uuid,
        /// Must be > 0.
        pub amount_minor: i64,
        pub category: Option<String>,
        pub note: Option<String>,
        /// Split equally among these active partners instead of by share.
        pub attributed_to: Option<Vec<String>>,
        /// RFC3339 timestamp, including timezone offset (local user time).
        pub occurred_at: DateTime<FixedOffset>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AllocationView {
        pub user_id: String,
        pub amount_minor: i64,
        pub percentage: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub asset_id: Uuid,
        pub amount_minor: i64,
        /// Revenue source or cost category.
        pub label: Option<String>,
        pub note: Option<String>,
        pub occurred_at: DateTime<Utc>,
        pub recorder_id: String,
        pub allocations: Vec<AllocationView>,
    }
}

pub mod position {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetPositionView {
        pub asset_id: Uuid,
        pub total_revenue_minor: i64,
        pub total_cost_minor: i64,
        pub net_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserPositionResponse {
        pub user_id: String,
        pub assets: Vec<AssetPositionView>,
        pub total_revenue_minor: i64,
        pub total_cost_minor: i64,
        pub net_minor: i64,
    }
}
