//! Task service with relational-primary, in-memory-fallback persistence.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, instrument, warn};

use crate::db::{DbError, MemoryTaskStore, NewTask, Priority, Task, TaskId, TaskPatch, TaskStore};

use super::{ServiceError, ServiceResult};

/// How `list` combines the two backends while the relational store is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReadPolicy {
    /// Relational rows plus any tasks written to memory during a relational
    /// failure, de-duplicated by id with the relational row kept.
    #[default]
    Merge,
    /// Relational rows only. Tasks written to memory during a relational
    /// failure stay invisible to `list` while the relational store answers.
    PreferPrimary,
}

/// Unvalidated create request.
#[derive(Debug, Clone, Default)]
pub struct CreateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

impl CreateTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    fn validate(self) -> ServiceResult<NewTask> {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ServiceError::validation("Title is required"))?;

        let priority = match self.priority.as_deref() {
            None | Some("") => Priority::default(),
            Some(p) => p.parse::<Priority>()?,
        };

        Ok(NewTask {
            id: None,
            title,
            description: self.description,
            completed: self.completed.unwrap_or(false),
            priority,
        })
    }
}

/// Health snapshot reported by `/api/health`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Health {
    pub status: &'static str,
    pub message: &'static str,
    pub db_available: bool,
}

/// Validates task requests and routes them to a backend.
///
/// Relational availability is decided once, when the service is started,
/// and never re-probed. While it is up, a mutating call that fails at the
/// relational layer is logged and replayed against the in-memory store so
/// the caller never sees a 5xx for a transient backend failure.
pub struct TaskService<P: TaskStore> {
    pub(super) primary: Option<P>,
    pub(super) fallback: MemoryTaskStore,
    policy: ReadPolicy,
    /// Set once memory has handed out an id while the relational store was up.
    diverged: AtomicBool,
}

impl<P: TaskStore> TaskService<P> {
    /// Build the service and seed the in-memory id counter from the
    /// relational high-water mark so fallback ids never trail it.
    pub async fn start(primary: Option<P>, policy: ReadPolicy) -> Self {
        let fallback = MemoryTaskStore::new();

        if let Some(store) = &primary {
            match store.max_id().await {
                Ok(Some(max)) => fallback.observe_id(max).await,
                Ok(None) => {}
                Err(e) => warn!(error = %e, backend = P::BACKEND, "Could not read max task id"),
            }
            info!(backend = P::BACKEND, "Task service using relational store");
        } else {
            info!("Task service using in-memory store");
        }

        Self {
            primary,
            fallback,
            policy,
            diverged: AtomicBool::new(false),
        }
    }

    /// A service with no relational backend.
    pub fn in_memory() -> Self {
        Self {
            primary: None,
            fallback: MemoryTaskStore::new(),
            policy: ReadPolicy::default(),
            diverged: AtomicBool::new(false),
        }
    }

    pub fn db_available(&self) -> bool {
        self.primary.is_some()
    }

    pub fn policy(&self) -> ReadPolicy {
        self.policy
    }

    pub fn health(&self) -> Health {
        Health {
            status: "OK",
            message: "TaskForge API is running",
            db_available: self.db_available(),
        }
    }

    /// All tasks, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<Task>> {
        let Some(primary) = &self.primary else {
            return Ok(self.fallback.list().await?);
        };

        let stored = match primary.list().await {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(error = %e, backend = P::BACKEND, "Listing failed, serving in-memory tasks");
                return Ok(self.fallback.list().await?);
            }
        };

        match self.policy {
            ReadPolicy::PreferPrimary => Ok(stored),
            ReadPolicy::Merge => Ok(merge(stored, self.fallback.list().await?)),
        }
    }

    /// Create a task, falling back to memory when the relational store fails.
    ///
    /// After the first fallback create, relational inserts take their id
    /// from the in-memory counter so the two backends never share an id.
    #[instrument(skip(self))]
    pub async fn create(&self, request: CreateTask) -> ServiceResult<Task> {
        let mut new_task = request.validate()?;

        if let Some(primary) = &self.primary {
            if self.diverged.load(Ordering::Acquire) {
                new_task.id = Some(self.fallback.reserve_id().await);
            }

            match primary.create(&new_task).await {
                Ok(task) => {
                    self.fallback.observe_id(task.id).await;
                    return Ok(task);
                }
                Err(DbError::Validation { message }) => {
                    return Err(ServiceError::Validation { message });
                }
                Err(e) => {
                    warn!(error = %e, backend = P::BACKEND, "Create failed, storing task in memory")
                }
            }
        }

        let task = self.fallback.create(&new_task).await?;
        if self.primary.is_some() {
            self.diverged.store(true, Ordering::Release);
        }
        Ok(task)
    }

    /// Apply a partial update and return the full task.
    ///
    /// Tasks written to memory during a relational failure stay editable
    /// after the relational store recovers. Ids neither backend knows are a
    /// `NotFound`.
    #[instrument(skip(self))]
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> ServiceResult<Task> {
        patch.validate()?;

        if let Some(primary) = &self.primary {
            match primary.update(id, &patch).await {
                Ok(task) => return Ok(task),
                Err(DbError::NotFound { .. }) => {}
                Err(DbError::Validation { message }) => {
                    return Err(ServiceError::Validation { message });
                }
                Err(e) => {
                    warn!(error = %e, backend = P::BACKEND, task_id = id, "Update failed, applying in memory");
                    return match self.fallback.update(id, &patch).await {
                        Ok(task) => Ok(task),
                        Err(DbError::NotFound { .. }) => Err(ServiceError::Backend {
                            message: "Failed to update task".to_string(),
                        }),
                        Err(e) => Err(e.into()),
                    };
                }
            }
        }

        match self.fallback.update(id, &patch).await {
            Ok(task) => Ok(task),
            Err(DbError::NotFound { .. }) => Err(ServiceError::task_not_found()),
            Err(e) => Err(e.into()),
        }
    }

    /// Remove a task.
    ///
    /// With a relational store, ids neither backend knows are a `NotFound`.
    /// The in-memory path, including the fallback after a relational
    /// failure, treats unknown ids as already deleted.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: TaskId) -> ServiceResult<()> {
        if let Some(primary) = &self.primary {
            match primary.delete(id).await {
                Ok(()) => return Ok(()),
                Err(DbError::NotFound { .. }) => {
                    if !self.fallback.contains(id).await {
                        return Err(ServiceError::task_not_found());
                    }
                }
                Err(e) => {
                    warn!(error = %e, backend = P::BACKEND, task_id = id, "Delete failed, removing from memory")
                }
            }
        }

        Ok(self.fallback.delete(id).await?)
    }
}

/// Union of relational and in-memory tasks ordered `created_at DESC, id ASC`.
fn merge(stored: Vec<Task>, mirrored: Vec<Task>) -> Vec<Task> {
    if mirrored.is_empty() {
        return stored;
    }

    let known: HashSet<TaskId> = stored.iter().map(|t| t.id).collect();
    let mut tasks = stored;
    tasks.extend(mirrored.into_iter().filter(|t| !known.contains(&t.id)));
    tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    tasks
}
