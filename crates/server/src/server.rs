use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use std::sync::Arc;

use crate::{assets, invitations, partnerships, positions, transactions, user};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

/// Basic authentication against the `users` table. The matching user is
/// stored in the request extensions for the handlers.
async fn auth(
    auth_header: TypedHeader<Authorization<Basic>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = user::Entity::find()
        .filter(user::Column::Username.eq(auth_header.username()))
        .filter(user::Column::Password.eq(auth_header.password()))
        .one(&state.db)
        .await
        .map_err(|err| {
            tracing::error!("failed to load user: {err}");
            StatusCode::UNAUTHORIZED
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Build the HTTP router over an engine and the database used for
/// authentication.
pub fn router(engine: Engine, db: DatabaseConnection) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    Router::new()
        .route("/companies", post(assets::company_new))
        .route("/banks", post(assets::bank_new))
        .route("/assets", get(assets::list).post(assets::asset_new))
        .route(
            "/assets/{asset_id}",
            get(assets::get).delete(assets::delete),
        )
        .route("/assets/{asset_id}/partnerships", get(partnerships::list))
        .route(
            "/assets/{asset_id}/partnerships/{username}",
            get(partnerships::details)
                .patch(partnerships::update)
                .delete(partnerships::deactivate),
        )
        .route(
            "/assets/{asset_id}/partnerships/{username}/reactivate",
            post(partnerships::reactivate),
        )
        .route(
            "/invitations",
            get(invitations::list).post(invitations::create),
        )
        .route(
            "/invitations/{invitation_id}/{action}",
            post(invitations::respond),
        )
        .route("/revenues", post(transactions::revenue_new))
        .route("/costs", post(transactions::cost_new))
        .route("/position", get(positions::get))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine, db)).await
}
