use crate::cli::api_client::ApiClient;
use crate::cli::error::{CliError, CliResult};
use crate::cli::utils::{apply_table_style, or_dash, truncate_with_ellipsis};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: String,
    pub created_at: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTaskRequest {
    pub(crate) title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) priority: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub(crate) struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) completed: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct DeleteResponse {
    message: String,
}

/// Which tasks `list` shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl TaskFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Pending => !task.completed,
        }
    }
}

#[derive(Tabled)]
pub(crate) struct TaskDisplay {
    #[tabled(rename = "ID")]
    pub(crate) id: i64,
    #[tabled(rename = "Done")]
    pub(crate) done: &'static str,
    #[tabled(rename = "Title")]
    pub(crate) title: String,
    #[tabled(rename = "Priority")]
    pub(crate) priority: String,
    #[tabled(rename = "Description")]
    pub(crate) description: String,
    #[tabled(rename = "Created")]
    pub(crate) created_at: String,
}

impl From<&Task> for TaskDisplay {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            done: if task.completed { "✓" } else { " " },
            title: truncate_with_ellipsis(&task.title, 50),
            priority: task.priority.clone(),
            description: truncate_with_ellipsis(&or_dash(task.description.as_deref()), 40),
            created_at: task.created_at.clone(),
        }
    }
}

/// Counts shown under the task table
#[derive(Debug, PartialEq, Eq)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl TaskSummary {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|t| t.completed).count();
        Self {
            total: tasks.len(),
            completed,
            pending: tasks.len() - completed,
        }
    }
}

/// Fetch every task; the server already orders them newest first.
pub async fn fetch_tasks(api_client: &ApiClient) -> CliResult<Vec<Task>> {
    let response = api_client.get("/tasks").send().await?;
    ApiClient::handle_response(response).await
}

/// List tasks, filtered client-side
pub async fn list_tasks(
    api_client: &ApiClient,
    filter: TaskFilter,
    format: &str,
) -> CliResult<String> {
    let tasks = fetch_tasks(api_client).await?;
    let summary = TaskSummary::of(&tasks);
    let visible: Vec<Task> = tasks.into_iter().filter(|t| filter.matches(t)).collect();

    match format {
        "json" => Ok(serde_json::to_string_pretty(&visible)?),
        _ => Ok(format!(
            "{}\n{} total, {} completed, {} pending",
            format_table(&visible),
            summary.total,
            summary.completed,
            summary.pending
        )),
    }
}

pub(crate) fn format_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let display_tasks: Vec<TaskDisplay> = tasks.iter().map(|t| t.into()).collect();
    let mut table = Table::new(display_tasks);
    apply_table_style(&mut table);
    table.to_string()
}

/// Create a task
pub async fn create_task(
    api_client: &ApiClient,
    title: &str,
    description: Option<&str>,
    priority: Option<&str>,
) -> CliResult<String> {
    if title.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "Title is required".to_string(),
        });
    }

    let request = CreateTaskRequest {
        title: title.to_string(),
        description: description.map(|s| s.to_string()),
        priority: priority.map(|s| s.to_string()),
    };

    let response = api_client.post("/tasks").json(&request).send().await?;
    let task: Task = ApiClient::handle_response(response).await?;

    Ok(format!("✓ Created task: {} ({})", task.title, task.id))
}

/// Mark a task completed or pending
pub async fn set_completed(api_client: &ApiClient, id: i64, completed: bool) -> CliResult<String> {
    let request = UpdateTaskRequest {
        completed: Some(completed),
        ..Default::default()
    };
    let task = send_update(api_client, id, &request).await?;

    let state = if task.completed { "completed" } else { "pending" };
    Ok(format!("✓ Task {} marked as {}", task.id, state))
}

/// Change a task's title and/or description
pub async fn edit_task(
    api_client: &ApiClient,
    id: i64,
    title: Option<&str>,
    description: Option<&str>,
) -> CliResult<String> {
    if title.is_none() && description.is_none() {
        return Err(CliError::InvalidInput {
            message: "Nothing to update: pass --title and/or --description".to_string(),
        });
    }

    let request = UpdateTaskRequest {
        title: title.map(|s| s.to_string()),
        description: description.map(|s| s.to_string()),
        completed: None,
    };
    let task = send_update(api_client, id, &request).await?;

    Ok(format!("✓ Updated task: {} ({})", task.title, task.id))
}

async fn send_update(
    api_client: &ApiClient,
    id: i64,
    request: &UpdateTaskRequest,
) -> CliResult<Task> {
    let response = api_client
        .put(&format!("/tasks/{}", id))
        .json(request)
        .send()
        .await?;
    ApiClient::handle_response(response).await
}

/// Delete a task
pub async fn delete_task(api_client: &ApiClient, id: i64) -> CliResult<String> {
    let response = api_client.delete(&format!("/tasks/{}", id)).send().await?;
    let body: DeleteResponse = ApiClient::handle_response(response).await?;

    Ok(format!("✓ {} ({})", body.message, id))
}
