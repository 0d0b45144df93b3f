//! Database error types.
//!
//! Storage-backend agnostic errors shared by the in-memory and relational
//! task stores. Uses miette for diagnostics and thiserror for derives.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(taskforge::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Entity already exists: {entity_type} with id '{id}'")]
    #[diagnostic(code(taskforge::db::already_exists))]
    AlreadyExists { entity_type: String, id: String },

    #[error("Invalid data: {message}")]
    #[diagnostic(code(taskforge::db::invalid_data))]
    InvalidData { message: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(taskforge::db::validation_error))]
    Validation { message: String },

    #[error("Database error: {message}")]
    #[diagnostic(code(taskforge::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(taskforge::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(
        code(taskforge::db::connection_error),
        help("Check DB_HOST, DB_PORT, DB_USER, DB_PASS and DB_NAME, or set DATABASE_URL")
    )]
    Connection { message: String },
}

impl DbError {
    pub(crate) fn task_not_found(id: i64) -> Self {
        DbError::NotFound {
            entity_type: "Task".to_string(),
            id: id.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
