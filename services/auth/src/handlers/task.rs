use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use otpgate_auth_types::identity::Identity;

use crate::domain::types::Task;
use crate::error::AuthServiceError;
use crate::handlers::response::envelope;
use crate::state::AppState;
use crate::usecase::task::{CreateTaskInput, CreateTaskUseCase, ListTasksUseCase};
use crate::validation::{RequestKind, parse};

pub const TASK_CREATED_MESSAGE: &str = "Task created.";
pub const TASKS_FOUND_MESSAGE: &str = "Tasks found.";

#[derive(Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub priority: String,
    #[serde(serialize_with = "otpgate_core::serde::to_rfc3339_ms")]
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub created_by: String,
    #[serde(serialize_with = "otpgate_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            priority: task.priority,
            date: task.date,
            description: task.description,
            created_by: task.created_by,
            created_at: task.created_at,
        }
    }
}

// ── POST /tasks ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub priority: String,
    pub date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

pub async fn create_task(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let req: CreateTaskRequest = parse(RequestKind::CreateTask, body)?;
    let usecase = CreateTaskUseCase {
        tasks: state.task_repo(),
    };
    let task = usecase
        .execute(CreateTaskInput {
            title: req.title,
            priority: req.priority,
            date: req.date,
            description: req.description,
            created_by: identity.user_id.to_string(),
        })
        .await?;
    Ok(envelope(
        StatusCode::CREATED,
        TASK_CREATED_MESSAGE,
        TaskResponse::from(task),
    ))
}

// ── GET /tasks ───────────────────────────────────────────────────────────────

pub async fn list_tasks(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = ListTasksUseCase {
        tasks: state.task_repo(),
    };
    let tasks = usecase.execute(&identity.user_id.to_string()).await?;
    let body: Vec<TaskResponse> = tasks.into_iter().map(TaskResponse::from).collect();
    Ok(envelope(StatusCode::OK, TASKS_FOUND_MESSAGE, body))
}
