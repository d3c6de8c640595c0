//! Wire types for the TaskHub API, as seen from the client.
//!
//! These deliberately mirror the server's response shapes rather than
//! importing them, so the client only compiles against the published wire
//! contract.

use serde::{Deserialize, Serialize};

use taskhub_entity::User;

/// Response to a successful `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Response to a successful `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    pub token: String,
}

/// Response to a successful `POST /refresh-token`.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// Generic `{"message": ...}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error body produced by the API: `{"status": "error", "message": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body for `POST /refresh-token`.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}
