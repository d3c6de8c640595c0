//! Maps domain `AppError` to HTTP responses.
//!
//! Every error body has the shape `{"status": "error", "message": "..."}`,
//! the contract the front end relies on for its 401 handling.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use taskhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `"error"`.
    pub status: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype around [`AppError`] carrying the HTTP mapping.
///
/// Handlers return `Result<_, ApiError>` so domain errors convert with `?`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Internal => {
                tracing::error!(error = %self.0.message, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            status: "error".to_string(),
            message: self.0.message,
        };

        (status, Json(body)).into_response()
    }
}
