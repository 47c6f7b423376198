use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::{EngineError, ErrorKind};

use serde::Serialize;
pub use server::{router, run_with_listener};

mod assets;
mod invitations;
mod partnerships;
mod positions;
mod server;
mod transactions;
mod user;
mod views;

pub mod types {
    pub mod asset {
        pub use api_types::asset::{
            AssetListResponse, AssetNew, AssetView, BankNew, CompanyNew, Created,
        };
    }

    pub mod partnership {
        pub use api_types::partnership::{
            AllocationRecordView, AssetPartnershipsResponse, PartnershipDetailsResponse,
            PartnershipUpdate, PartnershipView,
        };
    }

    pub mod invitation {
        pub use api_types::invitation::{
            InvitationListResponse, InvitationNew, InvitationResponseView, InvitationStatus,
            InvitationView,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{
            AllocationView, CostNew, RevenueNew, TransactionKind, TransactionView,
        };
    }

    pub mod position {
        pub use api_types::position::{AssetPositionView, UserPositionResponse};
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err.kind() {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict | ErrorKind::InvalidState | ErrorKind::CapacityExceeded => {
            StatusCode::CONFLICT
        }
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Consistency | ErrorKind::Database => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Consistency(msg) => {
            tracing::error!("inconsistent partnership data: {msg}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_conflicts_map_to_409() {
        for err in [
            EngineError::ExistingKey("x".to_string()),
            EngineError::InvalidState("invitation already accepted".to_string()),
            EngineError::CapacityExceeded("x".to_string()),
        ] {
            assert_eq!(
                ServerError::from(err).into_response().status(),
                StatusCode::CONFLICT
            );
        }
    }

    #[test]
    fn engine_validation_maps_to_422() {
        let res = ServerError::from(EngineError::Validation("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_consistency_maps_to_500() {
        let res = ServerError::from(EngineError::Consistency("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
