//! Session controller.
//!
//! Owns the client-side authentication state and the lifecycle calls:
//! register, login, restoring a session from stored tokens, and logout.
//! All API traffic goes through the shared [`ApiClient`], so session
//! calls benefit from the same transparent token refresh.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::warn;
use validator::ValidateEmail;

use taskhub_entity::User;

use crate::error::ClientError;
use crate::pipeline::ApiClient;
use crate::types::{LoginResponse, MessageResponse, RegisterResponse};

/// Client-side view of the session.
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(User),
}

/// Drives login, logout, and session restoration.
pub struct SessionController {
    client: Arc<ApiClient>,
    state: RwLock<AuthState>,
}

impl SessionController {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            state: RwLock::new(AuthState::Unauthenticated),
        }
    }

    /// The API client this session rides on.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Current state snapshot.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// The signed-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        match &*self.state.read().await {
            AuthState::Authenticated(user) => Some(user.clone()),
            AuthState::Unauthenticated => None,
        }
    }

    /// Creates an account. Does not sign the new user in; call
    /// [`SessionController::login`] afterwards.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<User, ClientError> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(ClientError::Validation("Password is required".to_owned()));
        }
        if password != password_confirmation {
            return Err(ClientError::Validation(
                "Password confirmation does not match".to_owned(),
            ));
        }

        let body = json!({
            "name": name,
            "email": email,
            "password": password,
            "password_confirmation": password_confirmation,
        });
        let response: RegisterResponse = self
            .client
            .request_json(Method::POST, "/register", Some(&body))
            .await?;
        Ok(response.user)
    }

    /// Signs in, stores both tokens, and marks the session authenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ClientError> {
        validate_email(email)?;
        if password.is_empty() {
            return Err(ClientError::Validation("Password is required".to_owned()));
        }

        let body = json!({ "email": email, "password": password });
        let login: LoginResponse = self
            .client
            .request_json(Method::POST, "/login", Some(&body))
            .await?;

        self.client.store().set_access_token(&login.access_token)?;
        self.client
            .store()
            .set_refresh_token(&login.refresh_token)?;

        *self.state.write().await = AuthState::Authenticated(login.user.clone());
        Ok(login.user)
    }

    /// Restores the session from stored tokens by fetching `/me`.
    ///
    /// Returns `Ok(None)` without a network call when either token is
    /// missing. A failed fetch leaves the session unauthenticated and is
    /// logged rather than treated as fatal.
    pub async fn fetch_current_user(&self) -> Result<Option<User>, ClientError> {
        let access = self.client.store().access_token()?;
        let refresh = self.client.store().refresh_token()?;
        if access.is_empty() || refresh.is_empty() {
            return Ok(None);
        }

        match self
            .client
            .request_json::<User>(Method::GET, "/me", None)
            .await
        {
            Ok(user) => {
                *self.state.write().await = AuthState::Authenticated(user.clone());
                Ok(Some(user))
            }
            Err(err) => {
                warn!(error = %err, "Failed to restore session");
                *self.state.write().await = AuthState::Unauthenticated;
                Err(err)
            }
        }
    }

    /// Signs out: tells the server to revoke the token, then clears local
    /// state. Local tokens are cleared even when the server call fails,
    /// so a dead session never wedges the client.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self
            .client
            .request_json::<MessageResponse>(Method::POST, "/logout", None)
            .await;
        if let Err(err) = &result {
            warn!(error = %err, "Logout request failed, clearing local session anyway");
        }

        self.client.store().clear()?;
        *self.state.write().await = AuthState::Unauthenticated;
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), ClientError> {
    if email.is_empty() {
        return Err(ClientError::Validation("Email is required".to_owned()));
    }
    if !email.validate_email() {
        return Err(ClientError::Validation(
            "Email must be a valid email address".to_owned(),
        ));
    }
    Ok(())
}
