//! JWT token creation with configurable signing and TTL.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use taskhub_core::config::auth::AuthConfig;
use taskhub_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl_minutes: config.jwt_access_ttl_minutes as i64,
            refresh_ttl_days: config.jwt_refresh_ttl_days as i64,
        }
    }

    /// Generates a new access + refresh token pair for the given user.
    pub fn generate_token_pair(&self, user_id: Uuid, email: &str) -> Result<TokenPair, AppError> {
        let access_token = self.sign(user_id, email, TokenType::Access)?;
        let refresh_token = self.sign(user_id, email, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Generates a standalone access token (e.g., after refresh).
    pub fn generate_access_token(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        self.sign(user_id, email, TokenType::Access)
    }

    /// Access token lifetime in seconds, as reported in login responses.
    pub fn access_expires_in(&self) -> i64 {
        self.access_ttl_minutes * 60
    }

    fn sign(&self, user_id: Uuid, email: &str, token_type: TokenType) -> Result<String, AppError> {
        let now = Utc::now();
        let exp = match token_type {
            TokenType::Access => now + chrono::Duration::minutes(self.access_ttl_minutes),
            TokenType::Refresh => now + chrono::Duration::days(self.refresh_ttl_days),
        };

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
