mod common;

use engine::{EngineError, ErrorKind, InvitationAction, InvitationCmd, InvitationStatus};
use uuid::Uuid;

use common::{add_partner, backdate_invitation, engine_with_db, new_asset};

#[tokio::test]
async fn accepted_invitation_creates_active_partnership() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 40.0).message("welcome"))
        .await
        .unwrap();
    assert_eq!(invitation.status, InvitationStatus::Pending);
    assert_eq!(invitation.message.as_deref(), Some("welcome"));

    let response = engine
        .respond_to_invitation(invitation.id, "bob", InvitationAction::Accept)
        .await
        .unwrap();
    assert_eq!(response.invitation.status, InvitationStatus::Accepted);
    assert!(response.invitation.responded_at.is_some());
    let partnership = response.partnership.unwrap();
    assert_eq!(partnership.user_id, "bob");
    assert_eq!(partnership.share_percentage, 40.0);
    assert!(partnership.is_active);

    let summary = engine.get_asset_partnerships(asset_id).await.unwrap();
    assert_eq!(summary.partnerships.len(), 1);
    assert_eq!(summary.total_allocated, 40.0);
    assert_eq!(summary.available_percentage, 60.0);
}

#[tokio::test]
async fn rejected_invitation_leaves_partnerships_untouched() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 40.0))
        .await
        .unwrap();
    let response = engine
        .respond_to_invitation(invitation.id, "bob", InvitationAction::Reject)
        .await
        .unwrap();

    assert_eq!(response.invitation.status, InvitationStatus::Rejected);
    assert!(response.partnership.is_none());
    assert!(engine.list_active_partnerships(asset_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn accept_over_capacity_rejects_the_invitation() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 60.0).await;
    add_partner(&engine, asset_id, "carol", 40.0).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "dave", 5.0))
        .await
        .unwrap();
    let err = engine
        .respond_to_invitation(invitation.id, "dave", InvitationAction::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    // The auto-rejection is committed even though the call failed.
    let listed = engine.list_invitations("dave").await.unwrap();
    assert_eq!(listed[0].status, InvitationStatus::Rejected);
    assert!(listed[0].status_reason.is_some());
    assert_eq!(engine.list_active_partnerships(asset_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn accept_filling_exactly_to_the_cap_succeeds() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 33.33).await;
    add_partner(&engine, asset_id, "carol", 33.33).await;
    add_partner(&engine, asset_id, "dave", 33.34).await;

    let summary = engine.get_asset_partnerships(asset_id).await.unwrap();
    assert!((summary.total_allocated - 100.0).abs() < 1e-9);
    assert!(summary.available_percentage < 1e-9);
}

#[tokio::test]
async fn accept_within_tolerance_of_the_cap_succeeds() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 60.0).await;
    add_partner(&engine, asset_id, "carol", 40.00005).await;

    let summary = engine.get_asset_partnerships(asset_id).await.unwrap();
    assert_eq!(summary.partnerships.len(), 2);
    assert!(summary.total_allocated > 100.0);
    assert_eq!(summary.available_percentage, 0.0);
}

#[tokio::test]
async fn accept_beyond_tolerance_of_the_cap_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 60.0).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "carol", 40.0002))
        .await
        .unwrap();
    let err = engine
        .respond_to_invitation(invitation.id, "carol", InvitationAction::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    let listed = engine.list_invitations("carol").await.unwrap();
    assert_eq!(listed[0].status, InvitationStatus::Rejected);
    assert_eq!(engine.list_active_partnerships(asset_id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn two_pending_invitations_cannot_both_be_accepted_past_the_cap() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    let to_bob = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 60.0))
        .await
        .unwrap();
    let to_carol = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "carol", 60.0))
        .await
        .unwrap();

    engine
        .respond_to_invitation(to_bob.id, "bob", InvitationAction::Accept)
        .await
        .unwrap();
    let err = engine
        .respond_to_invitation(to_carol.id, "carol", InvitationAction::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
}

#[tokio::test]
async fn expired_invitation_cannot_be_accepted() {
    let (engine, db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 10.0))
        .await
        .unwrap();
    backdate_invitation(&db, invitation.id).await;

    let err = engine
        .respond_to_invitation(invitation.id, "bob", InvitationAction::Accept)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidState("invitation expired".to_string())
    );

    let listed = engine.list_invitations("bob").await.unwrap();
    assert_eq!(listed[0].status, InvitationStatus::Expired);
    assert!(engine.list_active_partnerships(asset_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn listing_expires_overdue_invitations() {
    let (engine, db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 10.0))
        .await
        .unwrap();
    backdate_invitation(&db, invitation.id).await;

    let sent = engine.list_invitations("alice").await.unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].status, InvitationStatus::Expired);

    // A fresh invitation can be sent once the old one expired.
    engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 10.0))
        .await
        .unwrap();
}

#[tokio::test]
async fn responding_twice_fails_with_invalid_state() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 10.0))
        .await
        .unwrap();
    engine
        .respond_to_invitation(invitation.id, "bob", InvitationAction::Reject)
        .await
        .unwrap();

    for action in [InvitationAction::Accept, InvitationAction::Reject] {
        let err = engine
            .respond_to_invitation(invitation.id, "bob", action)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidState("invitation already rejected".to_string())
        );
    }
}

#[tokio::test]
async fn only_the_receiver_can_respond() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 10.0))
        .await
        .unwrap();
    let err = engine
        .respond_to_invitation(invitation.id, "carol", InvitationAction::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = engine
        .respond_to_invitation(Uuid::new_v4(), "bob", InvitationAction::Accept)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn create_invitation_validates_in_order() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    // Unknown asset wins over everything else.
    let err = engine
        .create_invitation(InvitationCmd::new(Uuid::new_v4(), "alice", "alice", 10.0))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("asset not exists".to_string()));

    // A user without access to the asset cannot invite.
    let err = engine
        .create_invitation(InvitationCmd::new(asset_id, "carol", "bob", 10.0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "mallory", 10.0))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("user not exists".to_string()));

    let err = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "alice", 10.0))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("cannot invite yourself".to_string())
    );

    add_partner(&engine, asset_id, "bob", 10.0).await;
    let err = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", 10.0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "carol", 10.0))
        .await
        .unwrap();
    let err = engine
        .create_invitation(InvitationCmd::new(asset_id, "alice", "carol", 20.0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn create_invitation_rejects_bad_share() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;

    for share in [0.0, -5.0, 100.5] {
        let err = engine
            .create_invitation(InvitationCmd::new(asset_id, "alice", "bob", share))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

#[tokio::test]
async fn active_partner_can_invite() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 30.0).await;

    let invitation = engine
        .create_invitation(InvitationCmd::new(asset_id, "bob", "carol", 20.0))
        .await
        .unwrap();
    assert_eq!(invitation.sender_id, "bob");
}

#[tokio::test]
async fn update_partnership_respects_the_cap() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 60.0).await;
    add_partner(&engine, asset_id, "carol", 30.0).await;

    let updated = engine
        .update_partnership(asset_id, "bob", 70.0, "alice")
        .await
        .unwrap();
    assert_eq!(updated.share_percentage, 70.0);

    let err = engine
        .update_partnership(asset_id, "bob", 70.5, "alice")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    // Only the owner may change shares.
    let err = engine
        .update_partnership(asset_id, "bob", 10.0, "bob")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn deactivate_and_reactivate_partnership() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 60.0).await;

    let left = engine
        .deactivate_partnership(asset_id, "bob", "bob")
        .await
        .unwrap();
    assert!(!left.is_active);
    assert!(left.left_at.is_some());
    assert!(engine.list_active_partnerships(asset_id).await.unwrap().is_empty());

    let err = engine
        .deactivate_partnership(asset_id, "bob", "alice")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    // Bob's share does not fit while carol holds 50%.
    add_partner(&engine, asset_id, "carol", 50.0).await;
    let err = engine
        .reactivate_partnership(asset_id, "bob", "alice")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);

    engine
        .update_partnership(asset_id, "bob", 50.0, "alice")
        .await
        .unwrap();
    let back = engine
        .reactivate_partnership(asset_id, "bob", "alice")
        .await
        .unwrap();
    assert!(back.is_active);
    assert!(back.left_at.is_none());
    assert_eq!(back.share_percentage, 50.0);
}

#[tokio::test]
async fn asset_owner_cannot_be_removed() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 60.0).await;

    let err = engine
        .deactivate_partnership(asset_id, "alice", "alice")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Validation("cannot remove asset owner".to_string())
    );

    // A third user can neither remove bob nor see the asset.
    let err = engine
        .deactivate_partnership(asset_id, "bob", "carol")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn former_partner_can_be_invited_again() {
    let (engine, _db) = engine_with_db().await;
    let asset_id = new_asset(&engine).await;
    add_partner(&engine, asset_id, "bob", 60.0).await;
    engine
        .deactivate_partnership(asset_id, "bob", "alice")
        .await
        .unwrap();

    let partnership = add_partner(&engine, asset_id, "bob", 25.0).await;
    assert!(partnership.is_active);
    assert_eq!(partnership.share_percentage, 25.0);
    assert_eq!(engine.list_active_partnerships(asset_id).await.unwrap().len(), 1);
}
