//! Invitation endpoints. The sender and the receiver are always the
//! authenticated user.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::invitation::{
    InvitationListResponse, InvitationNew, InvitationResponseView, InvitationView,
};
use engine::{InvitationAction, InvitationCmd};

use crate::{ServerError, server::ServerState, user, views};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<InvitationNew>,
) -> Result<(StatusCode, Json<InvitationView>), ServerError> {
    let mut cmd = InvitationCmd::new(
        payload.asset_id,
        user.username.clone(),
        payload.receiver_id,
        payload.share_percentage,
    );
    if let Some(message) = payload.message {
        cmd = cmd.message(message);
    }

    let invitation = state.engine.create_invitation(cmd).await?;
    Ok((StatusCode::CREATED, Json(views::invitation(invitation))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<InvitationListResponse>, ServerError> {
    let invitations = state
        .engine
        .list_invitations(&user.username)
        .await?
        .into_iter()
        .map(views::invitation)
        .collect();
    Ok(Json(InvitationListResponse { invitations }))
}

/// `POST /invitations/{id}/{action}` with `action` one of `accept`, `reject`.
pub async fn respond(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((invitation_id, action)): Path<(Uuid, String)>,
) -> Result<Json<InvitationResponseView>, ServerError> {
    let action = InvitationAction::try_from(action.as_str())?;
    let response = state
        .engine
        .respond_to_invitation(invitation_id, &user.username, action)
        .await?;
    Ok(Json(views::invitation_response(response)))
}
