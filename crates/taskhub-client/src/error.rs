//! Client-side error taxonomy.
//!
//! Four classes: local validation failures, API rejections (carrying the
//! server's status and message), transport errors, and token-storage
//! errors. The pipeline recovers exactly one class of failure locally (a
//! single 401 per request); everything else surfaces through these types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the TaskHub client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input failed client-side shape rules; no network call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The server rejected the request.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: StatusCode,
        /// Server-reported message.
        message: String,
    },

    /// Network or protocol failure before a response was produced.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token refresh call failed before the server could answer it.
    #[error("token refresh failed: {0}")]
    Refresh(String),

    /// The durable token store could not be read or written.
    #[error("token storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// True if this is an API rejection with status 401.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status, .. } if *status == StatusCode::UNAUTHORIZED)
    }
}

/// Cloneable outcome of a failed refresh call, fanned out to every caller
/// waiting on the in-flight refresh.
#[derive(Debug, Clone)]
pub struct RefreshError {
    /// HTTP status, if the server produced a response.
    pub status: Option<StatusCode>,
    /// Failure message.
    pub message: String,
}

impl RefreshError {
    /// A refresh that failed before reaching the server.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// A refresh the server rejected.
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<RefreshError> for ClientError {
    fn from(err: RefreshError) -> Self {
        match err.status {
            Some(status) => Self::Api {
                status,
                message: err.message,
            },
            None => Self::Refresh(err.message),
        }
    }
}
