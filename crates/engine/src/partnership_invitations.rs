//! Partnership invitations and their lifecycle.
//!
//! An invitation is created `Pending` and moves exactly once to one of the
//! terminal states `Accepted`, `Rejected` or `Expired`.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Partnership, util::parse_uuid};

/// How long an invitation stays open.
pub const INVITATION_TTL_DAYS: i64 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl InvitationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for InvitationStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            "expired" => Ok(Self::Expired),
            other => Err(EngineError::Validation(format!(
                "invalid invitation status: {other}"
            ))),
        }
    }
}

/// Answer of the receiver to a pending invitation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationAction {
    Accept,
    Reject,
}

impl TryFrom<&str> for InvitationAction {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(EngineError::Validation(format!(
                "invalid invitation action: {other}"
            ))),
        }
    }
}

/// An offer of a share of an asset from `sender_id` to `receiver_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub sender_id: String,
    pub receiver_id: String,
    pub share_percentage: f64,
    pub message: Option<String>,
    pub status: InvitationStatus,
    /// Why the engine resolved the invitation on its own (over capacity,
    /// expired). `None` for invitations answered by the receiver.
    pub status_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl Invitation {
    pub fn new(
        asset_id: Uuid,
        sender_id: &str,
        receiver_id: &str,
        share_percentage: f64,
        message: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id,
            sender_id: sender_id.to_string(),
            receiver_id: receiver_id.to_string(),
            share_percentage,
            message,
            status: InvitationStatus::Pending,
            status_reason: None,
            created_at: now,
            expires_at: now + Duration::days(INVITATION_TTL_DAYS),
            responded_at: None,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Result of answering an invitation: the resolved invitation and, when it
/// was accepted, the partnership it created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvitationResponse {
    pub invitation: Invitation,
    pub partnership: Option<Partnership>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "partnership_invitations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub asset_id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub share_percentage: f64,
    pub message: Option<String>,
    pub status: String,
    pub status_reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub expires_at: DateTimeUtc,
    pub responded_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assets::Entity",
        from = "Column::AssetId",
        to = "super::assets::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Assets,
}

impl Related<super::assets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Invitation> for ActiveModel {
    fn from(value: &Invitation) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            asset_id: ActiveValue::Set(value.asset_id.to_string()),
            sender_id: ActiveValue::Set(value.sender_id.clone()),
            receiver_id: ActiveValue::Set(value.receiver_id.clone()),
            share_percentage: ActiveValue::Set(value.share_percentage),
            message: ActiveValue::Set(value.message.clone()),
            status: ActiveValue::Set(value.status.as_str().to_string()),
            status_reason: ActiveValue::Set(value.status_reason.clone()),
            created_at: ActiveValue::Set(value.created_at),
            expires_at: ActiveValue::Set(value.expires_at),
            responded_at: ActiveValue::Set(value.responded_at),
        }
    }
}

impl TryFrom<Model> for Invitation {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "invitation")?,
            asset_id: parse_uuid(&model.asset_id, "asset")?,
            sender_id: model.sender_id,
            receiver_id: model.receiver_id,
            share_percentage: model.share_percentage,
            message: model.message,
            status: InvitationStatus::try_from(model.status.as_str())?,
            status_reason: model.status_reason,
            created_at: model.created_at,
            expires_at: model.expires_at,
            responded_at: model.responded_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn new_invitation_is_pending_for_a_week() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let invitation = Invitation::new(Uuid::new_v4(), "alice", "bob", 25.0, None, now);

        assert_eq!(invitation.status, InvitationStatus::Pending);
        assert_eq!(invitation.expires_at - invitation.created_at, Duration::days(7));
        assert!(!invitation.is_expired_at(now));
        assert!(invitation.is_expired_at(now + Duration::days(7)));
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(matches!(
            InvitationStatus::try_from("cancelled"),
            Err(EngineError::Validation(_))
        ));
    }

    #[test]
    fn only_pending_is_open() {
        assert!(!InvitationStatus::Pending.is_terminal());
        assert!(InvitationStatus::Accepted.is_terminal());
        assert!(InvitationStatus::Expired.is_terminal());
    }
}
