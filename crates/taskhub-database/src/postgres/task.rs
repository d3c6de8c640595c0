//! PostgreSQL task repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_entity::task::{CreateTask, Task, UpdateTask};

use crate::repositories::TaskRepository;

/// Task repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn find_all(&self) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks ORDER BY create_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task by id", e))
    }

    async fn create(&self, task: &CreateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, task_name, status, create_by, create_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(&task.task_name)
        .bind(task.status)
        .bind(task.create_by)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create task", e))
    }

    async fn update(&self, id: Uuid, update: &UpdateTask) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET task_name = COALESCE($2, task_name), \
             status = COALESCE($3, status) WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(update.task_name.as_deref())
        .bind(update.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update task", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete task", e))?;

        Ok(result.rows_affected() > 0)
    }
}
