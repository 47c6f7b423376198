//! Companies, banks and assets of the authenticated user.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::asset::{AssetListResponse, AssetNew, AssetView, BankNew, CompanyNew, Created};
use engine::NewAssetCmd;

use crate::{ServerError, server::ServerState, user, views};

pub async fn company_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CompanyNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state
        .engine
        .new_company(&payload.name, &user.username)
        .await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn bank_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BankNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let id = state.engine.new_bank(&payload.name, &user.username).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn asset_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<AssetNew>,
) -> Result<(StatusCode, Json<Created>), ServerError> {
    let mut cmd = NewAssetCmd::new(
        payload.name,
        payload.kind,
        payload.company_id,
        user.username.clone(),
    );
    if let Some(value_minor) = payload.value_minor {
        cmd = cmd.value_minor(value_minor);
    }
    if let Some(bank_id) = payload.bank_id {
        cmd = cmd.bank_id(bank_id);
    }

    let id = state.engine.new_asset(cmd).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<AssetListResponse>, ServerError> {
    let assets = state
        .engine
        .list_assets(&user.username)
        .await?
        .into_iter()
        .map(views::asset)
        .collect();
    Ok(Json(AssetListResponse { assets }))
}

pub async fn get(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetView>, ServerError> {
    let asset = state.engine.asset(asset_id, &user.username).await?;
    Ok(Json(views::asset(asset)))
}

pub async fn delete(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(asset_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .delete_asset(asset_id, &user.username)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
