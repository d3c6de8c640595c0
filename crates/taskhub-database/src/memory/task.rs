//! In-memory task repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use taskhub_core::result::AppResult;
use taskhub_entity::task::{CreateTask, Task, UpdateTask};

use crate::repositories::TaskRepository;

/// Task repository backed by a concurrent hash map.
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    tasks: DashMap<Uuid, Task>,
}

impl MemoryTaskRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn find_all(&self) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.iter().map(|t| t.clone()).collect();
        tasks.sort_by_key(|t| t.create_at);
        Ok(tasks)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Task>> {
        Ok(self.tasks.get(&id).map(|t| t.clone()))
    }

    async fn create(&self, task: &CreateTask) -> AppResult<Task> {
        let record = Task {
            id: Uuid::new_v4(),
            task_name: task.task_name.clone(),
            status: task.status,
            create_by: task.create_by,
            create_at: Utc::now(),
        };
        self.tasks.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, update: &UpdateTask) -> AppResult<Option<Task>> {
        match self.tasks.get_mut(&id) {
            Some(mut task) => {
                if let Some(name) = &update.task_name {
                    task.task_name = name.clone();
                }
                if let Some(status) = update.status {
                    task.status = status;
                }
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.tasks.remove(&id).is_some())
    }
}
