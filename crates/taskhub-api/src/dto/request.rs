//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use taskhub_core::error::AppError;
use taskhub_entity::task::TaskStatus;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password. Minimum length is enforced in the handler, where the
    /// configured `auth.password_min_length` is in reach.
    pub password: String,
    /// Password confirmation; must match `password`.
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub password_confirmation: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Create task request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task title.
    #[validate(length(min = 1, max = 255, message = "Task name is required"))]
    pub task_name: String,
    /// Workflow status.
    pub status: TaskStatus,
}

/// Partial task update request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New task title.
    #[validate(length(min = 1, max = 255, message = "Task name must not be empty"))]
    pub task_name: Option<String>,
    /// New workflow status.
    pub status: Option<TaskStatus>,
}

/// Run `validator` checks and flatten failures into one message.
pub fn validate(dto: &impl Validate) -> Result<(), AppError> {
    dto.validate().map_err(|errors| {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("Invalid value for {field}"),
                })
            })
            .collect();
        messages.sort();
        AppError::validation(messages.join("; "))
    })
}
