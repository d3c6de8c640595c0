//! Task entity model.
//!
//! Field names (`task_name`, `create_by`, `create_at`) match the wire
//! format consumed by the front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::TaskStatus;

/// A task record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique task identifier.
    pub id: Uuid,
    /// Task title.
    pub task_name: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// The user who created the task.
    pub create_by: Uuid,
    /// When the task was created.
    pub create_at: DateTime<Utc>,
}

/// Data required to create a new task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task title.
    pub task_name: String,
    /// Workflow status.
    pub status: TaskStatus,
    /// Creating user's ID.
    pub create_by: Uuid,
}

/// Partial update of an existing task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New task title.
    pub task_name: Option<String>,
    /// New workflow status.
    pub status: Option<TaskStatus>,
}
