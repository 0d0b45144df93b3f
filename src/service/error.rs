//! Service error taxonomy.
//!
//! Transient relational failures never appear here when a fallback path
//! exists; they are recovered inside the service.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{message}")]
    #[diagnostic(code(taskforge::service::validation))]
    Validation { message: String },

    #[error("{message}")]
    #[diagnostic(code(taskforge::service::not_found))]
    NotFound { message: String },

    #[error("{message}")]
    #[diagnostic(code(taskforge::service::conflict))]
    Conflict { message: String },

    #[error("{message}")]
    #[diagnostic(code(taskforge::service::unauthorized))]
    Unauthorized { message: String },

    #[error("{message}")]
    #[diagnostic(code(taskforge::service::backend))]
    Backend { message: String },
}

impl ServiceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn task_not_found() -> Self {
        ServiceError::NotFound {
            message: "Task not found".to_string(),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Validation { message } => ServiceError::Validation { message },
            DbError::NotFound { entity_type, .. } => ServiceError::NotFound {
                message: format!("{} not found", entity_type),
            },
            DbError::AlreadyExists { entity_type, .. } => ServiceError::Conflict {
                message: format!("{} already exists", entity_type),
            },
            other => ServiceError::Backend {
                message: other.to_string(),
            },
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
