//! Partnership store and query endpoints of an asset.
//!
//! Reads are restricted to the owner and the active partners of the asset.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use uuid::Uuid;

use api_types::partnership::{
    AssetPartnershipsResponse, PartnershipDetailsResponse, PartnershipUpdate, PartnershipView,
};

use crate::{ServerError, server::ServerState, user, views};

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<AssetPartnershipsResponse>, ServerError> {
    state.engine.asset(asset_id, &user.username).await?;
    let summary = state.engine.get_asset_partnerships(asset_id).await?;

    Ok(Json(AssetPartnershipsResponse {
        asset: views::asset(summary.asset),
        partnerships: summary
            .partnerships
            .into_iter()
            .map(views::partnership)
            .collect(),
        total_allocated: summary.total_allocated,
        available_percentage: summary.available_percentage,
    }))
}

pub async fn details(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((asset_id, username)): Path<(Uuid, String)>,
) -> Result<Json<PartnershipDetailsResponse>, ServerError> {
    state.engine.asset(asset_id, &user.username).await?;
    let details = state
        .engine
        .get_partnership_details(asset_id, &username)
        .await?;

    Ok(Json(PartnershipDetailsResponse {
        partnership: views::partnership(details.partnership),
        revenue_shares: details
            .revenue_shares
            .into_iter()
            .map(views::allocation_record)
            .collect(),
        cost_attributions: details
            .cost_attributions
            .into_iter()
            .map(views::allocation_record)
            .collect(),
        total_revenue_minor: details.total_revenue_minor,
        total_cost_minor: details.total_cost_minor,
        net_minor: details.net_minor,
    }))
}

pub async fn update(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((asset_id, username)): Path<(Uuid, String)>,
    Json(payload): Json<PartnershipUpdate>,
) -> Result<Json<PartnershipView>, ServerError> {
    let partnership = state
        .engine
        .update_partnership(
            asset_id,
            &username,
            payload.share_percentage,
            &user.username,
        )
        .await?;
    Ok(Json(views::partnership(partnership)))
}

pub async fn deactivate(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((asset_id, username)): Path<(Uuid, String)>,
) -> Result<Json<PartnershipView>, ServerError> {
    let partnership = state
        .engine
        .deactivate_partnership(asset_id, &username, &user.username)
        .await?;
    Ok(Json(views::partnership(partnership)))
}

pub async fn reactivate(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((asset_id, username)): Path<(Uuid, String)>,
) -> Result<Json<PartnershipView>, ServerError> {
    let partnership = state
        .engine
        .reactivate_partnership(asset_id, &username, &user.username)
        .await?;
    Ok(Json(views::partnership(partnership)))
}
