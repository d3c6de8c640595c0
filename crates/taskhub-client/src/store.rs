//! Durable token storage.
//!
//! The store holds exactly two values, an access token and a refresh
//! token, keyed `access-token` and `refresh-token`. An absent value reads
//! back as the empty string so callers can branch on `is_empty()` without
//! juggling options.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ClientError;

/// Storage key for the short-lived access token.
pub const ACCESS_TOKEN_KEY: &str = "access-token";
/// Storage key for the long-lived refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh-token";

/// Durable storage for the token pair.
///
/// Implementations must be safe to share across concurrent requests; the
/// pipeline writes a fresh access token while other requests read.
pub trait TokenStore: Send + Sync + 'static {
    /// Current access token, or the empty string when absent.
    fn access_token(&self) -> Result<String, ClientError>;

    /// Replaces the access token.
    fn set_access_token(&self, token: &str) -> Result<(), ClientError>;

    /// Current refresh token, or the empty string when absent.
    fn refresh_token(&self) -> Result<String, ClientError>;

    /// Replaces the refresh token.
    fn set_refresh_token(&self, token: &str) -> Result<(), ClientError>;

    /// Removes both tokens.
    fn clear(&self) -> Result<(), ClientError>;
}

/// Token store backed by a small JSON file on disk.
///
/// Reads and writes go through a mutex so concurrent refreshes cannot
/// interleave a read-modify-write cycle.
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Creates a store persisting to `path`. The file is created lazily on
    /// the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, ClientError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| ClientError::Storage(format!("read {}: {e}", self.path.display())))?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| ClientError::Storage(format!("parse {}: {e}", self.path.display())))
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ClientError::Storage(format!("create {}: {e}", parent.display())))?;
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| ClientError::Storage(format!("serialize tokens: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| ClientError::Storage(format!("write {}: {e}", self.path.display())))
    }

    fn get(&self, key: &str) -> Result<String, ClientError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        Ok(self.read_map()?.remove(key).unwrap_or_default())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut map = self.read_map()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }
}

fn poisoned() -> ClientError {
    ClientError::Storage("token store lock poisoned".to_owned())
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Result<String, ClientError> {
        self.get(ACCESS_TOKEN_KEY)
    }

    fn set_access_token(&self, token: &str) -> Result<(), ClientError> {
        self.set(ACCESS_TOKEN_KEY, token)
    }

    fn refresh_token(&self) -> Result<String, ClientError> {
        self.get(REFRESH_TOKEN_KEY)
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), ClientError> {
        self.set(REFRESH_TOKEN_KEY, token)
    }

    fn clear(&self) -> Result<(), ClientError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut map = self.read_map()?;
        map.remove(ACCESS_TOKEN_KEY);
        map.remove(REFRESH_TOKEN_KEY);
        self.write_map(&map)
    }
}

/// In-memory token store, used by tests and short-lived sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: Mutex<(String, String)>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Result<String, ClientError> {
        Ok(self.inner.lock().map_err(|_| poisoned())?.0.clone())
    }

    fn set_access_token(&self, token: &str) -> Result<(), ClientError> {
        self.inner.lock().map_err(|_| poisoned())?.0 = token.to_owned();
        Ok(())
    }

    fn refresh_token(&self) -> Result<String, ClientError> {
        Ok(self.inner.lock().map_err(|_| poisoned())?.1.clone())
    }

    fn set_refresh_token(&self, token: &str) -> Result<(), ClientError> {
        self.inner.lock().map_err(|_| poisoned())?.1 = token.to_owned();
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        let mut guard = self.inner.lock().map_err(|_| poisoned())?;
        guard.0.clear();
        guard.1.clear();
        Ok(())
    }
}
