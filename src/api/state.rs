//! Application state for the API server.

use std::sync::Arc;

use crate::db::TaskStore;
use crate::service::{AuthService, TaskService};

/// Shared application state, built once at startup and injected into every
/// handler.
///
/// Generic over the relational store so tests can substitute their own.
pub struct AppState<P: TaskStore> {
    tasks: Arc<TaskService<P>>,
    auth: AuthService,
}

// Manual Clone impl - only the Arc is cloned, P need not be Clone
impl<P: TaskStore> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            auth: self.auth.clone(),
        }
    }
}

impl<P: TaskStore> AppState<P> {
    pub fn new(tasks: TaskService<P>, auth: AuthService) -> Self {
        Self {
            tasks: Arc::new(tasks),
            auth,
        }
    }

    /// Get a reference to the task service.
    pub fn tasks(&self) -> &TaskService<P> {
        &self.tasks
    }

    /// Get a reference to the auth service.
    pub fn auth(&self) -> &AuthService {
        &self.auth
    }
}
