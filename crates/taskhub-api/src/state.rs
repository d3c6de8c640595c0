//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use taskhub_auth::{JwtDecoder, JwtEncoder, PasswordHasher, TokenBlocklist};
use taskhub_core::config::AppConfig;
use taskhub_database::Database;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Repositories for the configured backend.
    pub db: Database,
    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Logout blocklist.
    pub blocklist: Arc<TokenBlocklist>,
    /// Password hasher (Argon2id).
    pub password_hasher: Arc<PasswordHasher>,
}
