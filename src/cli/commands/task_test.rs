use std::sync::Arc;

use crate::api::{AppState, routes};
use crate::cli::api_client::ApiClient;
use crate::cli::commands::task::*;
use crate::cli::error::CliError;
use crate::db::{SqlTaskStore, UserStore};
use crate::service::{AuthService, ReadPolicy, TaskService};
use tokio::net::TcpListener;

fn task(id: i64, completed: bool) -> Task {
    Task {
        id,
        title: format!("Task {}", id),
        description: None,
        completed,
        priority: "medium".to_string(),
        created_at: "2025-01-01T09:30:00.000Z".to_string(),
    }
}

#[test]
fn test_filter_matches() {
    let done = task(1, true);
    let open = task(2, false);

    assert!(TaskFilter::All.matches(&done));
    assert!(TaskFilter::All.matches(&open));
    assert!(TaskFilter::Completed.matches(&done));
    assert!(!TaskFilter::Completed.matches(&open));
    assert!(TaskFilter::Pending.matches(&open));
    assert!(!TaskFilter::Pending.matches(&done));
}

#[test]
fn test_summary_counts() {
    let tasks = vec![task(1, true), task(2, false), task(3, false)];

    assert_eq!(
        TaskSummary::of(&tasks),
        TaskSummary {
            total: 3,
            completed: 1,
            pending: 2
        }
    );
}

#[test]
fn test_update_request_omits_absent_fields() {
    let req = UpdateTaskRequest {
        completed: Some(true),
        ..Default::default()
    };

    let json = serde_json::to_string(&req).unwrap();
    assert_eq!(json, r#"{"completed":true}"#);
}

#[test]
fn test_format_table_empty() {
    assert_eq!(format_table(&[]), "No tasks found.");
}

// =============================================================================
// Integration Tests - Test CLI commands against real HTTP server
// =============================================================================

/// Spawn a test HTTP server; `relational` backs it with in-memory SQLite.
async fn spawn_test_server(relational: bool) -> (ApiClient, tokio::task::JoinHandle<()>) {
    let primary = if relational {
        Some(
            SqlTaskStore::in_memory()
                .await
                .expect("Failed to create test database"),
        )
    } else {
        None
    };
    let state = AppState::new(
        TaskService::start(primary, ReadPolicy::default()).await,
        AuthService::new(Arc::new(UserStore::with_demo_user())),
    );
    let app = routes::create_router(state, &[]);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let _ = rustls::crypto::ring::default_provider().install_default();
    (
        ApiClient::new(Some(format!("http://{}/api", addr))),
        handle,
    )
}

fn extract_id(output: &str) -> i64 {
    output
        .rsplit('(')
        .next()
        .and_then(|s| s.split(')').next())
        .and_then(|s| s.parse().ok())
        .expect("Failed to extract task ID")
}

#[tokio::test(flavor = "multi_thread")]
async fn test_task_lifecycle_integration() {
    for relational in [true, false] {
        let (api_client, _handle) = spawn_test_server(relational).await;

        let output = create_task(&api_client, "Buy milk", Some("2 liters"), Some("high"))
            .await
            .unwrap();
        assert!(output.starts_with("✓ Created task: Buy milk"));
        let id = extract_id(&output);

        let output = set_completed(&api_client, id, true).await.unwrap();
        assert_eq!(output, format!("✓ Task {} marked as completed", id));

        let output = edit_task(&api_client, id, Some("Buy oat milk"), None)
            .await
            .unwrap();
        assert_eq!(output, format!("✓ Updated task: Buy oat milk ({})", id));

        let json = list_tasks(&api_client, TaskFilter::All, "json").await.unwrap();
        let tasks: Vec<Task> = serde_json::from_str(&json).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Buy oat milk");
        assert_eq!(tasks[0].description.as_deref(), Some("2 liters"));
        assert_eq!(tasks[0].priority, "high");
        assert!(tasks[0].completed);

        let output = delete_task(&api_client, id).await.unwrap();
        assert_eq!(output, format!("✓ Task deleted successfully ({})", id));

        let tasks = fetch_tasks(&api_client).await.unwrap();
        assert!(tasks.is_empty());
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_filter_and_summary_integration() {
    let (api_client, _handle) = spawn_test_server(false).await;

    let first = extract_id(&create_task(&api_client, "One", None, None).await.unwrap());
    create_task(&api_client, "Two", None, None).await.unwrap();
    create_task(&api_client, "Three", None, None).await.unwrap();
    set_completed(&api_client, first, true).await.unwrap();

    let json = list_tasks(&api_client, TaskFilter::Pending, "json").await.unwrap();
    let pending: Vec<Task> = serde_json::from_str(&json).unwrap();
    assert_eq!(pending.len(), 2);
    assert!(pending.iter().all(|t| !t.completed));

    let json = list_tasks(&api_client, TaskFilter::Completed, "json").await.unwrap();
    let completed: Vec<Task> = serde_json::from_str(&json).unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].id, first);

    let table = list_tasks(&api_client, TaskFilter::Completed, "table").await.unwrap();
    assert!(table.contains("One"));
    assert!(!table.contains("Two"));
    assert!(table.ends_with("3 total, 1 completed, 2 pending"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_errors_surface_as_api_errors() {
    let (api_client, _handle) = spawn_test_server(true).await;

    let err = set_completed(&api_client, 42, true).await.unwrap_err();
    match err {
        CliError::ApiError { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Task not found");
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = create_task(&api_client, "Bad", None, Some("urgent"))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::ApiError { status: 400, .. }));
}

#[tokio::test]
async fn test_blank_title_rejected_before_request() {
    let _ = rustls::crypto::ring::default_provider().install_default();
    let api_client = ApiClient::new(Some("http://127.0.0.1:1/api".to_string()));

    let err = create_task(&api_client, "   ", None, None).await.unwrap_err();
    assert!(matches!(err, CliError::InvalidInput { .. }));

    let err = edit_task(&api_client, 1, None, None).await.unwrap_err();
    assert!(matches!(err, CliError::InvalidInput { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health_integration() {
    let (api_client, _handle) = spawn_test_server(true).await;

    let output = crate::cli::commands::system::health(&api_client)
        .await
        .unwrap();

    assert!(output.starts_with("OK: TaskForge API is running"));
    assert!(output.contains("Storage: relational"));
}
