use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::Serialize;
use thiserror::Error;

/// Request-scoped failure taxonomy. Validation errors are raised before any
/// network call; auth errors are kept distinct from generic upstream errors
/// so the user can tell a bad key apart from a flaky service.
#[derive(Debug, Error)]
pub enum FaqError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Upstream(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for FaqError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Auth(_) => StatusCode::UNAUTHORIZED,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
