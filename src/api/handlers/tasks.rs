//! Task resource handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::utils::format_timestamp;
use crate::db::{Task, TaskId, TaskPatch, TaskStore};
use crate::service::{CreateTask, ServiceError};

use super::{ApiResult, ErrorResponse, JsonBody, error_response};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    #[schema(example = 1)]
    pub id: TaskId,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    #[schema(example = "medium")]
    pub priority: String,
    #[schema(example = "2025-01-01T09:30:00.000Z")]
    pub created_at: String,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            priority: t.priority.to_string(),
            created_at: format_timestamp(&t.created_at),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    /// low, medium or high (default medium)
    #[schema(example = "high")]
    pub priority: Option<String>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    pub completed: Option<bool>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Task deleted successfully")]
    pub message: String,
}

// =============================================================================
// Handlers
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks, newest first", body = Vec<TaskResponse>)
    )
)]
#[instrument(skip(state))]
pub async fn list_tasks<P: TaskStore>(
    State(state): State<AppState<P>>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let tasks = state.tasks().list().await.map_err(error_response)?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/tasks",
    tag = "tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskResponse),
        (status = 400, description = "Title missing or priority invalid", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_task<P: TaskStore>(
    State(state): State<AppState<P>>,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let task = state
        .tasks()
        .create(CreateTask {
            title: req.title,
            description: req.description,
            completed: req.completed,
            priority: req.priority,
        })
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = i64, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponse),
        (status = 400, description = "Title would become empty", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Relational store failed and no in-memory copy exists", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_task<P: TaskStore>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let id = parse_id(&id)?;
    let patch = TaskPatch {
        title: req.title,
        description: req.description,
        completed: req.completed,
    };

    let task = state
        .tasks()
        .update(id, patch)
        .await
        .map_err(error_response)?;

    Ok(Json(TaskResponse::from(task)))
}

#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    tag = "tasks",
    params(("id" = i64, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted", body = DeleteResponse),
        (status = 404, description = "Relational store has no such task", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_task<P: TaskStore>(
    State(state): State<AppState<P>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_id(&id)?;
    state.tasks().delete(id).await.map_err(error_response)?;

    Ok(Json(DeleteResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

// =============================================================================
// Helpers
// =============================================================================

/// Ids that are not integers cannot name a task.
fn parse_id(raw: &str) -> ApiResult<TaskId> {
    raw.parse()
        .map_err(|_| error_response(ServiceError::task_not_found()))
}
