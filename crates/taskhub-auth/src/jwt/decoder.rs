//! JWT token validation and blocklist checking.
//!
//! The 401 messages ("Token has expired", "Token is invalid", "Token not
//! found") are part of the middleware contract consumed by the front end:
//! the status code never varies, only the message.

use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use taskhub_core::config::auth::AuthConfig;
use taskhub_core::error::AppError;

use crate::blocklist::TokenBlocklist;

use super::claims::{Claims, TokenType};

/// Validates JWT tokens and checks blocklist status.
#[derive(Clone)]
pub struct JwtDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
    /// Blocklist of logged-out token IDs.
    blocklist: Arc<TokenBlocklist>,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig, blocklist: Arc<TokenBlocklist>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            blocklist,
        }
    }

    /// Decodes and validates an access token string.
    ///
    /// Checks:
    /// 1. Signature validity
    /// 2. Expiration
    /// 3. Token type is Access
    /// 4. JTI not in blocklist
    pub async fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::authentication("Token is invalid"));
        }

        if self.blocklist.contains(&claims.jti).await {
            return Err(AppError::authentication("Token is invalid"));
        }

        Ok(claims)
    }

    /// Decodes and validates a refresh token string.
    pub async fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;

        if claims.token_type != TokenType::Refresh {
            return Err(AppError::authentication("Token is invalid"));
        }

        Ok(claims)
    }

    /// Internal decode without type checking.
    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::authentication("Token has expired")
                    }
                    _ => AppError::authentication("Token is invalid"),
                }
            })?;

        Ok(token_data.claims)
    }
}
