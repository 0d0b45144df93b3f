//! Test doubles for the storage layer.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::db::{
    DbError, DbResult, MemoryTaskStore, NewTask, Task, TaskId, TaskPatch, TaskStore,
};

/// A "relational" store that can be switched into failure mode at runtime.
///
/// Healthy calls go to an inner [`MemoryTaskStore`], with ids offset so they
/// are distinguishable from ids the service's own fallback hands out.
pub struct FlakyStore {
    inner: MemoryTaskStore,
    failing: AtomicBool,
    calls: AtomicUsize,
}

impl FlakyStore {
    pub fn healthy() -> Self {
        Self {
            inner: MemoryTaskStore::new(),
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        let store = Self::healthy();
        store.set_failing(true);
        store
    }

    /// Start ids at `first_id` instead of 1.
    pub async fn starting_at(self, first_id: TaskId) -> Self {
        self.inner.observe_id(first_id - 1).await;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> DbResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbError::Connection {
                message: "connection reset by peer".to_string(),
            });
        }
        Ok(())
    }
}

impl TaskStore for FlakyStore {
    const BACKEND: &'static str = "flaky";

    async fn list(&self) -> DbResult<Vec<Task>> {
        self.check()?;
        self.inner.list().await
    }

    async fn create(&self, task: &NewTask) -> DbResult<Task> {
        self.check()?;
        self.inner.create(task).await
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> DbResult<Task> {
        self.check()?;
        self.inner.update(id, patch).await
    }

    async fn delete(&self, id: TaskId) -> DbResult<()> {
        self.check()?;
        // Relational semantics: deleting nothing is an error
        if !self.inner.list().await?.iter().any(|t| t.id == id) {
            return Err(DbError::task_not_found(id));
        }
        self.inner.delete(id).await
    }

    async fn max_id(&self) -> DbResult<Option<TaskId>> {
        self.check()?;
        self.inner.max_id().await
    }
}
