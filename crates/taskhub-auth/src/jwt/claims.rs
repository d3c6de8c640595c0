//! JWT claims structure used in access and refresh tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims payload embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Email for convenience.
    pub email: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// JWT ID for blocklist tracking.
    pub jti: Uuid,
    /// Token type: "access" or "refresh".
    pub token_type: TokenType,
}

/// Distinguishes access tokens from refresh tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    /// Short-lived access token for API requests.
    Access,
    /// Long-lived refresh token for obtaining new access tokens.
    Refresh,
}
