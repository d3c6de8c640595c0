//! Task CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use taskhub_core::error::AppError;
use taskhub_entity::task::{CreateTask, Task, UpdateTask};

use crate::dto::request::{self, CreateTaskRequest, UpdateTaskRequest};
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.db.tasks.find_all().await?;
    Ok(Json(tasks))
}

/// GET /tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .db
        .tasks
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("task not found"))?;

    Ok(Json(task))
}

/// POST /tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    request::validate(&req)?;

    let task = state
        .db
        .tasks
        .create(&CreateTask {
            task_name: req.task_name,
            status: req.status,
            create_by: auth.sub,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /tasks/{id}
pub async fn update_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    request::validate(&req)?;

    let update = UpdateTask {
        task_name: req.task_name,
        status: req.status,
    };
    let task = state
        .db
        .tasks
        .update(id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("task not found"))?;

    Ok(Json(task))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.db.tasks.delete(id).await?;
    if !deleted {
        return Err(AppError::not_found("task not found").into());
    }

    Ok(Json(MessageResponse {
        message: "task deleted".to_string(),
    }))
}
