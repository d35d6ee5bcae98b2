use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::TaskRepository;
use crate::domain::types::Task;
use crate::error::AuthServiceError;

pub struct CreateTaskInput {
    pub title: String,
    pub priority: String,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
    /// Identity of the caller, stored as text.
    pub created_by: String,
}

pub struct CreateTaskUseCase<T: TaskRepository> {
    pub tasks: T,
}

impl<T: TaskRepository> CreateTaskUseCase<T> {
    pub async fn execute(&self, input: CreateTaskInput) -> Result<Task, AuthServiceError> {
        let mut errors = Vec::new();
        if input.title.trim().is_empty() {
            errors.push("Title is required".to_owned());
        }
        if input.priority.trim().is_empty() {
            errors.push("Priority is required".to_owned());
        }
        if !errors.is_empty() {
            return Err(AuthServiceError::Validation(errors));
        }

        let now = Utc::now();
        let task = Task {
            id: Uuid::now_v7(),
            title: input.title,
            priority: input.priority,
            date: input.date.unwrap_or(now),
            description: input.description,
            created_by: input.created_by,
            created_at: now,
        };
        self.tasks.create(&task).await?;
        Ok(task)
    }
}

pub struct ListTasksUseCase<T: TaskRepository> {
    pub tasks: T,
}

impl<T: TaskRepository> ListTasksUseCase<T> {
    pub async fn execute(&self, created_by: &str) -> Result<Vec<Task>, AuthServiceError> {
        self.tasks.list_by_creator(created_by).await
    }
}
