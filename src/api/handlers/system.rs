//! System health handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::db::TaskStore;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    #[schema(example = "OK")]
    pub status: String,
    #[schema(example = "TaskForge API is running")]
    pub message: String,
    /// Whether the relational store was reachable at startup
    #[serde(rename = "dbAvailable")]
    pub db_available: bool,
}

/// Health check endpoint
///
/// Reports whether tasks are being persisted relationally or in memory.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "system",
    responses(
        (status = 200, description = "Health check successful", body = HealthResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<P: TaskStore>(State(state): State<AppState<P>>) -> Json<HealthResponse> {
    let health = state.tasks().health();
    Json(HealthResponse {
        status: health.status.to_string(),
        message: health.message.to_string(),
        db_available: health.db_available,
    })
}
