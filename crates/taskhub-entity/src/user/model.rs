//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user in the TaskHub system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unique email address used for login.
    pub email: String,
    /// Argon2 password hash. Never serialized into responses.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
