//! Authenticated request pipeline.
//!
//! Every API call goes through [`ApiClient::execute`]: attach the stored
//! access token, send, and on a 401 refresh the token once and replay the
//! original request. Concurrent 401s share a single refresh call through
//! the [`RefreshGate`]; each caller still replays its own request.
//!
//! A request is replayed at most once. If the replay also comes back 401
//! the response is returned unmodified, so a revoked session surfaces to
//! the caller instead of looping.

use std::sync::Arc;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ClientError, RefreshError};
use crate::refresh::{RefreshGate, Role};
use crate::store::TokenStore;
use crate::types::{ApiErrorBody, RefreshRequest, RefreshResponse};

/// HTTP client for the TaskHub API with transparent token refresh.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    gate: RefreshGate,
}

impl ApiClient {
    /// Creates a client targeting `base_url` (no trailing slash), reading
    /// and writing tokens through `store`.
    pub fn new(base_url: impl Into<String>, store: Arc<dyn TokenStore>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            gate: RefreshGate::new(),
        }
    }

    /// The token store backing this client.
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Sends an authenticated request, refreshing the access token and
    /// replaying once on a 401.
    ///
    /// Returns the response for any status; callers decide how to treat
    /// non-401 failures. A 401 with no stored access or refresh token is
    /// returned as-is, since there is no session to refresh.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response, ClientError> {
        let access = self.store.access_token()?;
        let response = self.send(method.clone(), path, body, &access).await?;

        if response.status() != StatusCode::UNAUTHORIZED || access.is_empty() {
            return Ok(response);
        }
        if self.store.refresh_token()?.is_empty() {
            // Nothing to refresh with; surface the original rejection.
            return Ok(response);
        }

        debug!(path, "Access token rejected, refreshing");
        let fresh = self.refresh_access_token().await?;
        self.send(method, path, body, &fresh).await
    }

    /// Sends an authenticated request and decodes a successful JSON body.
    ///
    /// Non-2xx responses become [`ClientError::Api`] with the server's
    /// message.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<T, ClientError> {
        let response = self.execute(method, path, body).await?;
        Self::expect_json(response).await
    }

    /// Decodes a JSON body, mapping error statuses to [`ClientError::Api`].
    pub async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Api {
                status,
                message: Self::error_message(response).await,
            });
        }
        Ok(response.json().await?)
    }

    async fn error_message(response: Response) -> String {
        let status = response.status();
        match response.json::<ApiErrorBody>().await {
            Ok(body) => body
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        token: &str,
    ) -> Result<Response, ClientError> {
        let mut request = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if !token.is_empty() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    /// Obtains a fresh access token, joining an in-flight refresh if one
    /// is already running.
    async fn refresh_access_token(&self) -> Result<String, ClientError> {
        match self.gate.join().await {
            Role::Follower(rx) => {
                let outcome = rx
                    .await
                    .map_err(|_| RefreshError::transport("refresh abandoned"))?;
                Ok(outcome?)
            }
            Role::Leader => {
                let outcome = self.perform_refresh().await;
                if let Err(err) = &outcome {
                    warn!(message = %err.message, "Token refresh failed");
                }
                self.gate.settle(outcome.clone()).await;
                Ok(outcome?)
            }
        }
    }

    /// The actual `POST /refresh-token` call, run by the leader only.
    ///
    /// On success the new access token is stored before any waiter is
    /// released, so replays and later requests both see it. On failure
    /// the stored tokens are left untouched.
    async fn perform_refresh(&self) -> Result<String, RefreshError> {
        let refresh_token = self
            .store
            .refresh_token()
            .map_err(|e| RefreshError::transport(e.to_string()))?;

        let body = RefreshRequest { refresh_token };
        let response = self
            .http
            .post(format!("{}/refresh-token", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| RefreshError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(RefreshError::rejected(status, message));
        }

        let payload: RefreshResponse = response
            .json()
            .await
            .map_err(|e| RefreshError::transport(e.to_string()))?;

        self.store
            .set_access_token(&payload.access_token)
            .map_err(|e| RefreshError::transport(e.to_string()))?;

        debug!("Access token refreshed");
        Ok(payload.access_token)
    }
}
