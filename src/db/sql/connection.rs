//! Pool construction and schema management.

use std::time::Duration;

use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};
use tracing::debug;

use crate::db::{DbError, DbResult, TaskId};

/// SQL dialect, chosen from the connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn from_url(url: &str) -> DbResult<Self> {
        let scheme = url.split(':').next().unwrap_or_default();
        match scheme {
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(DbError::Connection {
                message: format!("unsupported database scheme '{}'", scheme),
            }),
        }
    }

    fn create_tasks_table(&self) -> &'static str {
        match self {
            Dialect::MySql => {
                r#"
                CREATE TABLE IF NOT EXISTS tasks (
                    id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
                    title VARCHAR(255) NOT NULL,
                    description TEXT NULL,
                    completed BIGINT NOT NULL DEFAULT 0,
                    priority VARCHAR(16) NOT NULL DEFAULT 'medium',
                    created_at VARCHAR(32) NOT NULL,
                    INDEX idx_tasks_created_at (created_at)
                )
                "#
            }
            Dialect::Sqlite => {
                r#"
                CREATE TABLE IF NOT EXISTS tasks (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT,
                    completed INTEGER NOT NULL DEFAULT 0,
                    priority TEXT NOT NULL DEFAULT 'medium',
                    created_at TEXT NOT NULL
                )
                "#
            }
        }
    }
}

/// Relational task store. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct SqlTaskStore {
    pub(super) pool: AnyPool,
    dialect: Dialect,
}

impl SqlTaskStore {
    /// Open a pool and acquire a first connection.
    ///
    /// Failing here is what marks the relational backend as down for the
    /// lifetime of the process.
    pub async fn connect(url: &str, pool_size: u32, timeout: Duration) -> DbResult<Self> {
        install_default_drivers();
        let dialect = Dialect::from_url(url)?;

        let pool = AnyPoolOptions::new()
            .max_connections(pool_size.max(1))
            .acquire_timeout(timeout)
            .connect(url)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        debug!(?dialect, pool_size, "Relational pool opened");
        Ok(Self { pool, dialect })
    }

    /// Single-connection in-memory SQLite store (useful for testing).
    pub async fn in_memory() -> DbResult<Self> {
        let store = Self::connect("sqlite::memory:", 1, Duration::from_secs(5)).await?;
        store.migrate().await?;
        Ok(store)
    }

    /// Create the `tasks` table if it does not exist.
    pub async fn migrate(&self) -> DbResult<()> {
        sqlx::query(self.dialect.create_tasks_table())
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })?;
        Ok(())
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub(super) async fn fetch_max_id(&self) -> DbResult<Option<TaskId>> {
        sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM tasks")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DbError::Database {
                message: e.to_string(),
            })
    }
}
