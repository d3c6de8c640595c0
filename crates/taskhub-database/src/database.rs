//! Backend dispatch — selects repositories based on configuration.

use std::sync::Arc;

use tracing::info;

use taskhub_core::config::database::DatabaseConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;

use crate::memory::{MemoryTaskRepository, MemoryUserRepository};
use crate::postgres::{PgTaskRepository, PgUserRepository};
use crate::repositories::{TaskRepository, UserRepository};

/// The set of repositories for the configured backend.
///
/// Constructed once at startup and shared through the application state.
#[derive(Clone)]
pub struct Database {
    /// User repository.
    pub users: Arc<dyn UserRepository>,
    /// Task repository.
    pub tasks: Arc<dyn TaskRepository>,
}

impl Database {
    /// Connect to the configured backend, running migrations for Postgres.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend.as_str() {
            "postgres" => {
                let pool = crate::connection::create_pool(config).await?;
                crate::connection::run_migrations(&pool).await?;
                Ok(Self {
                    users: Arc::new(PgUserRepository::new(pool.clone())),
                    tasks: Arc::new(PgTaskRepository::new(pool)),
                })
            }
            "memory" => {
                info!("Using in-memory repositories; data will not survive a restart");
                Ok(Self::memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database backend: '{other}'. Supported: postgres, memory"
            ))),
        }
    }

    /// Construct the in-memory backend directly (used by tests).
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            tasks: Arc::new(MemoryTaskRepository::new()),
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}
