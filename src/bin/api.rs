//! TaskForge API server binary.
//!
//! Probes the relational store once at startup. If it cannot be reached the
//! server still starts and serves every endpoint from memory.

use std::sync::Arc;

use clap::Parser;
use miette::Diagnostic;
use taskforge::api::{self, ApiError, AppState, Config};
use taskforge::config::Settings;
use taskforge::db::{DbResult, SqlTaskStore, UserStore};
use taskforge::service::{AuthService, TaskService};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("API server error: {0}")]
    #[diagnostic(code(taskforge::binary::api))]
    Api(#[from] ApiError),
}

async fn open_store(settings: &Settings) -> DbResult<SqlTaskStore> {
    let store = SqlTaskStore::connect(
        &settings.database_url(),
        settings.db_pool_size,
        settings.connect_timeout(),
    )
    .await?;
    store.migrate().await?;
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let settings = Settings::parse();
    api::init_tracing();

    let primary = match open_store(&settings).await {
        Ok(store) => {
            info!(url = %settings.redacted_database_url(), "Database connected");
            Some(store)
        }
        Err(e) => {
            warn!(error = %e, "Database unavailable - using in-memory storage");
            None
        }
    };

    let tasks = TaskService::start(primary, settings.read_policy).await;
    info!(
        db_available = tasks.db_available(),
        read_policy = ?tasks.policy(),
        "Task storage ready"
    );
    let auth = AuthService::new(Arc::new(UserStore::with_demo_user()));

    api::run(
        Config {
            host: settings.host,
            port: settings.port,
            cors_origins: settings.cors_origins,
        },
        AppState::new(tasks, auth),
    )
    .await?;

    Ok(())
}
