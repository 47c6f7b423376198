use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;

use api_types::transaction::{CostNew, RevenueNew, TransactionView};
use engine::{CostCmd, RevenueCmd};

use crate::{ServerError, server::ServerState, user, views};

pub async fn revenue_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<RevenueNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let mut cmd = RevenueCmd::new(
        payload.asset_id,
        user.username.clone(),
        payload.amount_minor,
        payload.occurred_at.with_timezone(&Utc),
    );
    if let Some(source) = payload.source {
        cmd = cmd.source(source);
    }
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }

    let revenue = state.engine.record_revenue(cmd).await?;
    Ok((StatusCode::CREATED, Json(views::transaction(revenue))))
}

pub async fn cost_new(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CostNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let mut cmd = CostCmd::new(
        payload.asset_id,
        user.username.clone(),
        payload.amount_minor,
        payload.occurred_at.with_timezone(&Utc),
    );
    if let Some(category) = payload.category {
        cmd = cmd.category(category);
    }
    if let Some(note) = payload.note {
        cmd = cmd.note(note);
    }
    if let Some(users) = payload.attributed_to {
        cmd = cmd.attributed_to(users);
    }

    let cost = state.engine.record_cost(cmd).await?;
    Ok((StatusCode::CREATED, Json(views::transaction(cost))))
}
