use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use points_snapshot::SnapshotError;

use crate::dto::ApiResponse;

#[derive(Error, Debug, Serialize, Deserialize)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Internal server error")]
    InternalServerError,
}

impl ApiError {
    /// The "data unavailable" condition: no snapshot is installed, either
    /// because the first fetch is still outstanding or the last one failed.
    pub fn data_unavailable() -> Self {
        Self::ServiceUnavailable("points data unavailable".to_string())
    }
}

impl From<SnapshotError> for ApiError {
    fn from(err: SnapshotError) -> Self {
        match err {
            SnapshotError::Http(_) | SnapshotError::UpstreamStatus { .. } => {
                // NOTE: details are logged at the snapshot layer
                Self::ServiceUnavailable("upstream points feed unavailable".to_string())
            }
            SnapshotError::Superseded => Self::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        let response: ApiResponse<()> = ApiResponse::error(msg);
        (status, Json(response)).into_response()
    }
}
