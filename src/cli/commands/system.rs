use serde::Deserialize;

use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
    message: String,
    #[serde(rename = "dbAvailable")]
    db_available: bool,
}

/// Report server health and which storage backend it is serving from
pub async fn health(api_client: &ApiClient) -> CliResult<String> {
    let response = api_client.get("/health").send().await?;
    let health: HealthResponse = ApiClient::handle_response(response).await?;

    let storage = if health.db_available {
        "relational"
    } else {
        "in-memory"
    };
    Ok(format!(
        "{}: {}\nStorage: {}\nServer: {}",
        health.status,
        health.message,
        storage,
        api_client.base_url()
    ))
}
