//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use jsonwebtoken::{EncodingKey, Header};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use uuid::Uuid;

use taskhub_auth::{Claims, TokenType};
use taskhub_client::{ApiClient, MemoryTokenStore, TokenStore};
use taskhub_core::config::AppConfig;
use taskhub_database::Database;

/// Signing secret shared by the test server and locally minted tokens.
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// How long the test server stalls inside `/refresh-token`. Widens the
/// window in which concurrent 401 handlers pile onto the refresh gate.
pub const REFRESH_DELAY: Duration = Duration::from_millis(150);

/// A live TaskHub server on an ephemeral port, backed by in-memory
/// repositories, with instrumentation on the refresh endpoint.
pub struct TestApp {
    pub addr: SocketAddr,
    refresh_calls: Arc<AtomicUsize>,
}

impl TestApp {
    /// Boots a server and returns once it is accepting connections.
    pub async fn spawn() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = TEST_JWT_SECRET.to_string();
        config.database.backend = "memory".to_string();

        let state = taskhub_api::app::build_state(Arc::new(config), Database::memory());

        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&refresh_calls);
        let app = taskhub_api::app::build_app(state).layer(middleware::from_fn(
            move |request: Request, next: Next| {
                let counter = Arc::clone(&counter);
                async move {
                    if request.uri().path() == "/refresh-token" {
                        counter.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(REFRESH_DELAY).await;
                    }
                    next.run(request).await
                }
            },
        ));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server crashed");
        });

        Self {
            addr,
            refresh_calls,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// How many times `/refresh-token` has been hit.
    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    /// Fresh API client with its own empty in-memory token store.
    pub fn client(&self) -> (Arc<ApiClient>, Arc<MemoryTokenStore>) {
        let store = Arc::new(MemoryTokenStore::new());
        let client = Arc::new(ApiClient::new(
            self.base_url(),
            Arc::clone(&store) as Arc<dyn TokenStore>,
        ));
        (client, store)
    }

    /// Registers a user and returns the created user's ID.
    pub async fn register_user(
        &self,
        client: &ApiClient,
        name: &str,
        email: &str,
        password: &str,
    ) -> Uuid {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "password_confirmation": password,
        });
        let response = client
            .execute(Method::POST, "/register", Some(&body))
            .await
            .expect("register request failed");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body: Value = response.json().await.expect("register body not json");
        body["user"]["id"]
            .as_str()
            .and_then(|s| s.parse().ok())
            .expect("register response missing user id")
    }

    /// Logs in and returns `(access_token, refresh_token)`.
    pub async fn login(&self, client: &ApiClient, email: &str, password: &str) -> (String, String) {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = client
            .execute(Method::POST, "/login", Some(&body))
            .await
            .expect("login request failed");
        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = response.json().await.expect("login body not json");
        (
            body["access_token"].as_str().expect("no access_token").to_string(),
            body["refresh_token"].as_str().expect("no refresh_token").to_string(),
        )
    }

    /// Registers, logs in, and seeds the client's store with the pair.
    pub async fn signed_in_user(
        &self,
        client: &ApiClient,
        store: &MemoryTokenStore,
        email: &str,
    ) -> Uuid {
        let user_id = self.register_user(client, "Test User", email, "secret123").await;
        let (access, refresh) = self.login(client, email, "secret123").await;
        store.set_access_token(&access).unwrap();
        store.set_refresh_token(&refresh).unwrap();
        user_id
    }
}

/// Mints an access token that expired an hour ago, signed with the test
/// secret so the server trusts the signature but rejects the expiry.
pub fn expired_access_token(user_id: Uuid, email: &str) -> String {
    let now = chrono::Utc::now();
    mint_token(
        user_id,
        email,
        (now - chrono::Duration::hours(1)).timestamp(),
        TokenType::Access,
    )
}

/// Mints a refresh token valid for a week, for any user id — including
/// one that does not exist in the database.
pub fn refresh_token_for(user_id: Uuid, email: &str) -> String {
    let now = chrono::Utc::now();
    mint_token(
        user_id,
        email,
        (now + chrono::Duration::days(7)).timestamp(),
        TokenType::Refresh,
    )
}

fn mint_token(user_id: Uuid, email: &str, exp: i64, token_type: TokenType) -> String {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp(),
        exp,
        jti: Uuid::new_v4(),
        token_type,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to mint test token")
}
