//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use porchlight_core::DeskError;
use serde::Serialize;
use thiserror::Error;

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wire shape for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("assistant error: {0}")]
    Desk(#[from] DeskError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ApiError::Desk(_) => (StatusCode::INTERNAL_SERVER_ERROR, "assistant_error"),
        };
        let body = Json(ErrorBody {
            error: error.to_string(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
