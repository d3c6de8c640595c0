//! Typed task operations over the authenticated pipeline.

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use taskhub_entity::{Task, TaskStatus, UpdateTask};

use crate::error::ClientError;
use crate::pipeline::ApiClient;
use crate::types::MessageResponse;

/// Task CRUD against `/tasks`.
pub struct TaskClient {
    client: Arc<ApiClient>,
}

impl TaskClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// All tasks visible to the signed-in user.
    pub async fn list(&self) -> Result<Vec<Task>, ClientError> {
        self.client.request_json(Method::GET, "/tasks", None).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Task, ClientError> {
        self.client
            .request_json(Method::GET, &format!("/tasks/{id}"), None)
            .await
    }

    pub async fn create(&self, task_name: &str, status: TaskStatus) -> Result<Task, ClientError> {
        if task_name.trim().is_empty() {
            return Err(ClientError::Validation("Task name is required".to_owned()));
        }
        let body = json!({ "task_name": task_name, "status": status });
        self.client
            .request_json(Method::POST, "/tasks", Some(&body))
            .await
    }

    /// Partial update; `None` fields are left unchanged server-side.
    pub async fn update(&self, id: Uuid, update: &UpdateTask) -> Result<Task, ClientError> {
        let body = serde_json::to_value(update)
            .map_err(|e| ClientError::Validation(format!("invalid update payload: {e}")))?;
        self.client
            .request_json(Method::PATCH, &format!("/tasks/{id}"), Some(&body))
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ClientError> {
        let _: MessageResponse = self
            .client
            .request_json(Method::DELETE, &format!("/tasks/{id}"), None)
            .await?;
        Ok(())
    }
}
