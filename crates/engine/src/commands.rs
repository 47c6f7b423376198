//! Command structs for engine operations.
//!
//! These types group parameters for write operations (assets, invitations,
//! revenues, costs), keeping call sites readable and avoiding long argument
//! lists.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Create an asset owned by `owner_id`.
#[derive(Clone, Debug)]
pub struct NewAssetCmd {
    pub name: String,
    pub kind: String,
    pub value_minor: Option<i64>,
    pub company_id: Uuid,
    pub bank_id: Option<Uuid>,
    pub owner_id: String,
}

impl NewAssetCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: impl Into<String>,
        company_id: Uuid,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value_minor: None,
            company_id,
            bank_id: None,
            owner_id: owner_id.into(),
        }
    }

    #[must_use]
    pub fn value_minor(mut self, value_minor: i64) -> Self {
        self.value_minor = Some(value_minor);
        self
    }

    #[must_use]
    pub fn bank_id(mut self, bank_id: Uuid) -> Self {
        self.bank_id = Some(bank_id);
        self
    }
}

/// Offer `share_percentage` of an asset to another user.
#[derive(Clone, Debug)]
pub struct InvitationCmd {
    pub asset_id: Uuid,
    pub sender_id: String,
    pub receiver_id: String,
    pub share_percentage: f64,
    pub message: Option<String>,
}

impl InvitationCmd {
    #[must_use]
    pub fn new(
        asset_id: Uuid,
        sender_id: impl Into<String>,
        receiver_id: impl Into<String>,
        share_percentage: f64,
    ) -> Self {
        Self {
            asset_id,
            sender_id: sender_id.into(),
            receiver_id: receiver_id.into(),
            share_percentage,
            message: None,
        }
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Record a revenue on an asset.
#[derive(Clone, Debug)]
pub struct RevenueCmd {
    pub asset_id: Uuid,
    pub amount_minor: i64,
    pub source: Option<String>,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub recorder_id: String,
}

impl RevenueCmd {
    #[must_use]
    pub fn new(
        asset_id: Uuid,
        recorder_id: impl Into<String>,
        amount_minor: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            asset_id,
            amount_minor,
            source: None,
            note: None,
            occurred_at,
            recorder_id: recorder_id.into(),
        }
    }

    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Record a cost on an asset.
///
/// Without `attributed_to` the cost is split by the active shares; with it,
/// equally among the listed partners.
#[derive(Clone, Debug)]
pub struct CostCmd {
    pub asset_id: Uuid,
    pub amount_minor: i64,
    pub category: Option<String>,
    pub note: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub recorder_id: String,
    pub attributed_to: Option<Vec<String>>,
}

impl CostCmd {
    #[must_use]
    pub fn new(
        asset_id: Uuid,
        recorder_id: impl Into<String>,
        amount_minor: i64,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            asset_id,
            amount_minor,
            category: None,
            note: None,
            occurred_at,
            recorder_id: recorder_id.into(),
            attributed_to: None,
        }
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn attributed_to<I, S>(mut self, user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributed_to = Some(user_ids.into_iter().map(Into::into).collect());
        self
    }
}
