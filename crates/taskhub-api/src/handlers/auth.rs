//! Auth handlers — register, login, refresh, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

use taskhub_core::error::AppError;
use taskhub_entity::user::{CreateUser, User};

use crate::dto::request::{self, LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{LoginResponse, MessageResponse, RefreshResponse, RegisterResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    request::validate(&req)?;

    let min_length = state.config.auth.password_min_length;
    if req.password.chars().count() < min_length {
        return Err(AppError::validation(format!(
            "Password must be at least {min_length} characters"
        ))
        .into());
    }

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .db
        .users
        .create(&CreateUser {
            name: req.name,
            email: req.email,
            password_hash,
        })
        .await?;

    let access_token = state.jwt_encoder.generate_access_token(user.id, &user.email)?;

    info!(user_id = %user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            token: format!("Bearer {access_token}"),
            user,
        }),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    request::validate(&req)?;

    let user = state
        .db
        .users
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| AppError::authentication("Invalid credential"))?;

    let verified = state
        .password_hasher
        .verify_password(&req.password, &user.password_hash)?;
    if !verified {
        return Err(AppError::authentication("Invalid credential").into());
    }

    let tokens = state.jwt_encoder.generate_token_pair(user.id, &user.email)?;

    info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        user,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_encoder.access_expires_in(),
    }))
}

/// POST /refresh-token
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let claims = state
        .jwt_decoder
        .decode_refresh_token(&req.refresh_token)
        .await
        .map_err(|_| AppError::authentication("Invalid refresh token"))?;

    let access_token = state
        .jwt_encoder
        .generate_access_token(claims.sub, &claims.email)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.blocklist.revoke(auth.jti).await;

    info!(user_id = %auth.sub, "User logged out");
    Ok(Json(MessageResponse {
        message: "Logout success".to_string(),
    }))
}

/// GET /me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> Result<Json<User>, ApiError> {
    let user = state
        .db
        .users
        .find_by_id(auth.sub)
        .await?
        .ok_or_else(|| AppError::authentication("Token is invalid"))?;

    Ok(Json(user))
}
