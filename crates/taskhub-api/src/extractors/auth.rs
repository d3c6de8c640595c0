//! `AuthUser` extractor — pulls the JWT from the Authorization header and
//! validates it.
//!
//! Any handler taking an `AuthUser` argument is bearer-protected; there is
//! no way to reach one without a valid, unexpired, unrevoked access token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use taskhub_auth::Claims;
use taskhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated claims available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl std::ops::Deref for AuthUser {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Token not found"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Token not found"))?;

        let claims = state.jwt_decoder.decode_access_token(token).await?;

        Ok(AuthUser(claims))
    }
}
