//! In-memory user repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_entity::user::{CreateUser, User};

use crate::repositories::UserRepository;

/// User repository backed by a concurrent hash map.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: DashMap<Uuid, User>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .map(|u| u.clone()))
    }

    async fn create(&self, user: &CreateUser) -> AppResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::conflict("The email has already been taken"));
        }

        let now = Utc::now();
        let record = User {
            id: Uuid::new_v4(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(record.id, record.clone());
        Ok(record)
    }
}
