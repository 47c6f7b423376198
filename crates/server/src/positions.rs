use axum::{Extension, Json, extract::State};

use api_types::position::UserPositionResponse;

use crate::{ServerError, server::ServerState, user, views};

/// Net position of the authenticated user across every asset.
pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<UserPositionResponse>, ServerError> {
    let position = state.engine.user_position(&user.username).await?;
    Ok(Json(views::user_position(position)))
}
