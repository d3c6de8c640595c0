//! In-memory blocklist of logged-out access tokens.
//!
//! Logout invalidates the presented access token server-side. Entries
//! only need to survive as long as an access token can remain valid, so
//! the cache TTL equals the access token TTL.

use std::time::Duration;

use moka::future::Cache;
use uuid::Uuid;

use taskhub_core::config::auth::AuthConfig;

/// TTL cache of revoked JWT IDs.
#[derive(Debug, Clone)]
pub struct TokenBlocklist {
    /// Revoked jti values; value is unused.
    revoked: Cache<Uuid, ()>,
}

impl TokenBlocklist {
    /// Create a blocklist sized for the configured access token TTL.
    pub fn new(config: &AuthConfig) -> Self {
        // Keep entries one extra minute past token expiry for clock skew.
        let ttl = Duration::from_secs((config.jwt_access_ttl_minutes + 1) * 60);
        let revoked = Cache::builder()
            .max_capacity(100_000)
            .time_to_live(ttl)
            .build();

        Self { revoked }
    }

    /// Revoke a token by its JWT ID.
    pub async fn revoke(&self, jti: Uuid) {
        self.revoked.insert(jti, ()).await;
    }

    /// Check whether a JWT ID has been revoked.
    pub async fn contains(&self, jti: &Uuid) -> bool {
        self.revoked.get(jti).await.is_some()
    }
}
