//! The task storage contract.
//!
//! Both backends implement [`TaskStore`] and must be indistinguishable to the
//! caller except for durability and the delete asymmetry documented on
//! [`TaskStore::delete`].

use std::future::Future;

use crate::db::{DbResult, NewTask, Task, TaskId, TaskPatch};

/// Storage for task records.
pub trait TaskStore: Send + Sync + 'static {
    /// Short backend name used in log fields.
    const BACKEND: &'static str;

    /// All tasks. Stores may return them in any order.
    fn list(&self) -> impl Future<Output = DbResult<Vec<Task>>> + Send;

    /// Insert a task with a fresh id and `created_at = now`.
    ///
    /// Fails with `DbError::Validation` when the title is empty.
    fn create(&self, task: &NewTask) -> impl Future<Output = DbResult<Task>> + Send;

    /// Apply the fields present in `patch` and return the updated task.
    ///
    /// Fails with `DbError::NotFound` when no task has `id`.
    fn update(&self, id: TaskId, patch: &TaskPatch)
    -> impl Future<Output = DbResult<Task>> + Send;

    /// Remove a task.
    ///
    /// The relational store reports `DbError::NotFound` when nothing was
    /// deleted; the in-memory store treats a missing id as success.
    fn delete(&self, id: TaskId) -> impl Future<Output = DbResult<()>> + Send;

    /// Highest id currently stored, if any.
    fn max_id(&self) -> impl Future<Output = DbResult<Option<TaskId>>> + Send;
}
