//! Repository traits implemented by each storage backend.

use async_trait::async_trait;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_entity::task::{CreateTask, Task, UpdateTask};
use taskhub_entity::user::{CreateUser, User};

/// User persistence operations.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Create a new user. Fails with a conflict if the email is taken.
    async fn create(&self, user: &CreateUser) -> AppResult<User>;
}

/// Task persistence operations.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// List all tasks, oldest first.
    async fn find_all(&self) -> AppResult<Vec<Task>>;

    /// Find a task by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>>;

    /// Create a new task and return it.
    async fn create(&self, task: &CreateTask) -> AppResult<Task>;

    /// Apply a partial update. Returns `None` if the task does not exist.
    async fn update(&self, id: Uuid, update: &UpdateTask) -> AppResult<Option<Task>>;

    /// Delete a task by primary key. Returns `true` if deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}
