//! Response DTOs.
//!
//! Success bodies carry no envelope; keys are snake_case.

use serde::{Deserialize, Serialize};

use taskhub_entity::user::User;

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// User profile.
    pub user: User,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

/// Registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// The created user.
    pub user: User,
    /// Ready-to-use header value: `"Bearer <access token>"`.
    pub token: String,
}

/// Token refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// The new access token.
    pub access_token: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the server is up.
    pub status: String,
    /// Server version.
    pub version: String,
}
