//! Invitation lifecycle: offering a share of an asset and resolving the offer.
//!
//! Expiry is evaluated lazily, whenever an invitation is touched again.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, Condition, DatabaseTransaction, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    EngineError, Invitation, InvitationAction, InvitationCmd, InvitationResponse,
    InvitationStatus, ResultEngine, partnership_invitations,
    share::{exceeds_cap, validate_share},
    util::normalize_optional_text,
};

use super::{Engine, partnerships::capacity_exceeded, with_tx};

const EXPIRED_REASON: &str = "invitation expired before a response";

/// Outcome of a response transaction. `Refused` still commits the status
/// change it carries, then surfaces the error to the caller.
enum Resolution {
    Answered(InvitationResponse),
    Refused(EngineError),
}

impl Engine {
    async fn save_invitation_status(
        &self,
        db: &DatabaseTransaction,
        invitation: &Invitation,
    ) -> ResultEngine<()> {
        partnership_invitations::ActiveModel {
            id: ActiveValue::Set(invitation.id.to_string()),
            status: ActiveValue::Set(invitation.status.as_str().to_string()),
            status_reason: ActiveValue::Set(invitation.status_reason.clone()),
            responded_at: ActiveValue::Set(invitation.responded_at),
            ..Default::default()
        }
        .update(db)
        .await?;
        Ok(())
    }

    async fn expire_invitation(
        &self,
        db: &DatabaseTransaction,
        invitation: &mut Invitation,
        now: DateTime<Utc>,
    ) -> ResultEngine<()> {
        invitation.status = InvitationStatus::Expired;
        invitation.status_reason = Some(EXPIRED_REASON.to_string());
        self.save_invitation_status(db, invitation).await?;
        tracing::warn!(
            invitation_id = %invitation.id,
            expired_at = %invitation.expires_at,
            checked_at = %now,
            "invitation expired"
        );
        Ok(())
    }

    /// Pending invitation of `receiver_id` for the asset, if one is still open.
    /// An overdue one is expired on the way.
    async fn open_invitation_for(
        &self,
        db: &DatabaseTransaction,
        asset_id: Uuid,
        receiver_id: &str,
        now: DateTime<Utc>,
    ) -> ResultEngine<Option<Invitation>> {
        let pending = partnership_invitations::Entity::find()
            .filter(partnership_invitations::Column::AssetId.eq(asset_id.to_string()))
            .filter(partnership_invitations::Column::ReceiverId.eq(receiver_id.to_string()))
            .filter(
                partnership_invitations::Column::Status
                    .eq(InvitationStatus::Pending.as_str().to_string()),
            )
            .all(db)
            .await?;

        let mut open = None;
        for model in pending {
            let mut invitation = Invitation::try_from(model)?;
            if invitation.is_expired_at(now) {
                self.expire_invitation(db, &mut invitation, now).await?;
            } else {
                open = Some(invitation);
            }
        }
        Ok(open)
    }

    /// Offers `cmd.share_percentage` of an asset to `cmd.receiver_id`.
    ///
    /// Checked in order: the asset exists (and the sender is its owner or an
    /// active partner), the receiver exists, the receiver is not the sender,
    /// the receiver holds no active partnership on the asset and has no other
    /// pending invitation for it. The invitation expires after
    /// [`INVITATION_TTL_DAYS`](crate::INVITATION_TTL_DAYS) days.
    pub async fn create_invitation(&self, cmd: InvitationCmd) -> ResultEngine<Invitation> {
        let share_percentage = validate_share(cmd.share_percentage)?;
        let message = normalize_optional_text(cmd.message.as_deref());
        let now = Utc::now();

        with_tx!(self, |db_tx| {
            self.require_asset_access(&db_tx, cmd.asset_id, &cmd.sender_id)
                .await?;
            self.require_user_exists(&db_tx, &cmd.receiver_id).await?;
            if cmd.sender_id == cmd.receiver_id {
                return Err(EngineError::Validation(
                    "cannot invite yourself".to_string(),
                ));
            }
            let already_partner = self
                .partnership_row(&db_tx, cmd.asset_id, &cmd.receiver_id)
                .await?
                .is_some_and(|row| row.is_active);
            if already_partner {
                return Err(EngineError::Validation(format!(
                    "user '{}' already holds an active partnership on this asset",
                    cmd.receiver_id
                )));
            }
            if self
                .open_invitation_for(&db_tx, cmd.asset_id, &cmd.receiver_id, now)
                .await?
                .is_some()
            {
                return Err(EngineError::Validation(format!(
                    "user '{}' already has a pending invitation for this asset",
                    cmd.receiver_id
                )));
            }

            let invitation = Invitation::new(
                cmd.asset_id,
                &cmd.sender_id,
                &cmd.receiver_id,
                share_percentage,
                message,
                now,
            );
            partnership_invitations::ActiveModel::from(&invitation)
                .insert(&db_tx)
                .await?;
            tracing::info!(
                invitation_id = %invitation.id,
                asset_id = %invitation.asset_id,
                sender = %invitation.sender_id,
                receiver = %invitation.receiver_id,
                share = invitation.share_percentage,
                "invitation created"
            );
            Ok(invitation)
        })
    }

    /// Accepts or rejects a pending invitation on behalf of its receiver.
    ///
    /// An overdue invitation is marked expired and the call fails. Accepting
    /// re-checks the 100% cap inside the transaction; when the share no longer
    /// fits, the invitation is marked rejected and the call fails with
    /// [`EngineError::CapacityExceeded`]. In both cases the status change is
    /// committed. Otherwise the invitation is accepted and the partnership
    /// written atomically.
    pub async fn respond_to_invitation(
        &self,
        invitation_id: Uuid,
        acting_user_id: &str,
        action: InvitationAction,
    ) -> ResultEngine<InvitationResponse> {
        let now = Utc::now();

        let resolution = with_tx!(self, |db_tx| {
            let model = partnership_invitations::Entity::find_by_id(invitation_id.to_string())
                .filter(
                    partnership_invitations::Column::ReceiverId.eq(acting_user_id.to_string()),
                )
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("invitation not exists".to_string()))?;
            let mut invitation = Invitation::try_from(model)?;

            if invitation.status.is_terminal() {
                return Err(EngineError::InvalidState(format!(
                    "invitation already {}",
                    invitation.status
                )));
            }

            if invitation.is_expired_at(now) {
                self.expire_invitation(&db_tx, &mut invitation, now).await?;
                Ok(Resolution::Refused(EngineError::InvalidState(
                    "invitation expired".to_string(),
                )))
            } else {
                match action {
                    InvitationAction::Reject => {
                        invitation.status = InvitationStatus::Rejected;
                        invitation.responded_at = Some(now);
                        self.save_invitation_status(&db_tx, &invitation).await?;
                        tracing::info!(invitation_id = %invitation.id, "invitation rejected");
                        Ok(Resolution::Answered(InvitationResponse {
                            invitation,
                            partnership: None,
                        }))
                    }
                    InvitationAction::Accept => {
                        self.accept_invitation(&db_tx, invitation, now).await
                    }
                }
            }
        })?;

        match resolution {
            Resolution::Answered(response) => Ok(response),
            Resolution::Refused(err) => Err(err),
        }
    }

    async fn accept_invitation(
        &self,
        db: &DatabaseTransaction,
        mut invitation: Invitation,
        now: DateTime<Utc>,
    ) -> ResultEngine<Resolution> {
        let asset = self.require_asset(db, invitation.asset_id).await?;
        let already_partner = self
            .partnership_row(db, asset.id, &invitation.receiver_id)
            .await?
            .is_some_and(|row| row.is_active);
        if already_partner {
            return Err(EngineError::Validation(format!(
                "user '{}' already holds an active partnership on this asset",
                invitation.receiver_id
            )));
        }

        let others = self
            .active_share_total(db, asset.id, Some(&invitation.receiver_id))
            .await?;
        let total = others + invitation.share_percentage;
        if exceeds_cap(total) {
            let err = capacity_exceeded(&asset, total);
            invitation.status = InvitationStatus::Rejected;
            invitation.status_reason = Some(err.to_string());
            invitation.responded_at = Some(now);
            self.save_invitation_status(db, &invitation).await?;
            tracing::warn!(
                invitation_id = %invitation.id,
                asset_id = %asset.id,
                total,
                "invitation auto-rejected: share no longer fits"
            );
            return Ok(Resolution::Refused(err));
        }

        invitation.status = InvitationStatus::Accepted;
        invitation.responded_at = Some(now);
        self.save_invitation_status(db, &invitation).await?;
        let partnership = self
            .upsert_active_partnership(
                db,
                asset.id,
                &invitation.receiver_id,
                invitation.share_percentage,
                now,
            )
            .await?;
        tracing::info!(
            invitation_id = %invitation.id,
            asset_id = %asset.id,
            user_id = %partnership.user_id,
            share = partnership.share_percentage,
            "invitation accepted"
        );

        Ok(Resolution::Answered(InvitationResponse {
            invitation,
            partnership: Some(partnership),
        }))
    }

    /// Lists invitations `user_id` sent or received, newest first.
    ///
    /// Pending invitations past their expiry are marked expired first.
    pub async fn list_invitations(&self, user_id: &str) -> ResultEngine<Vec<Invitation>> {
        let now = Utc::now();
        with_tx!(self, |db_tx| {
            self.require_user_exists(&db_tx, user_id).await?;
            let models = partnership_invitations::Entity::find()
                .filter(
                    Condition::any()
                        .add(partnership_invitations::Column::SenderId.eq(user_id.to_string()))
                        .add(partnership_invitations::Column::ReceiverId.eq(user_id.to_string())),
                )
                .order_by_desc(partnership_invitations::Column::CreatedAt)
                .all(&db_tx)
                .await?;

            let mut out = Vec::with_capacity(models.len());
            for model in models {
                let mut invitation = Invitation::try_from(model)?;
                if invitation.status == InvitationStatus::Pending && invitation.is_expired_at(now)
                {
                    self.expire_invitation(&db_tx, &mut invitation, now).await?;
                }
                out.push(invitation);
            }
            Ok(out)
        })
    }
}
