//! In-process task store used when the relational backend is unavailable.

use tokio::sync::Mutex;

use crate::db::utils::current_timestamp;
use crate::db::{DbError, DbResult, NewTask, Task, TaskId, TaskPatch, TaskStore};

struct MemoryState {
    tasks: Vec<Task>,
    next_id: TaskId,
}

/// Ordered task collection behind a single lock.
///
/// Id assignment and insertion happen under the same guard so concurrent
/// creates never observe or hand out the same id.
pub struct MemoryTaskStore {
    state: Mutex<MemoryState>,
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tasks: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Keep the counter ahead of an id produced elsewhere.
    pub async fn observe_id(&self, id: TaskId) {
        let mut state = self.state.lock().await;
        if id >= state.next_id {
            state.next_id = id + 1;
        }
    }

    /// Hand out the next id without storing a task under it.
    pub async fn reserve_id(&self) -> TaskId {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        id
    }

    pub async fn contains(&self, id: TaskId) -> bool {
        self.state.lock().await.tasks.iter().any(|t| t.id == id)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.tasks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl TaskStore for MemoryTaskStore {
    const BACKEND: &'static str = "memory";

    async fn list(&self) -> DbResult<Vec<Task>> {
        let state = self.state.lock().await;
        let mut tasks = state.tasks.clone();
        // Stable sort keeps insertion order for equal timestamps
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn create(&self, task: &NewTask) -> DbResult<Task> {
        task.validate()?;

        let mut state = self.state.lock().await;
        let id = match task.id {
            Some(id) if state.tasks.iter().any(|t| t.id == id) => {
                return Err(DbError::AlreadyExists {
                    entity_type: "Task".to_string(),
                    id: id.to_string(),
                });
            }
            Some(id) => id,
            None => state.next_id,
        };
        state.next_id = state.next_id.max(id + 1);

        let created = Task {
            id,
            title: task.title.clone(),
            description: task.description.clone().filter(|d| !d.is_empty()),
            completed: task.completed,
            priority: task.priority,
            created_at: current_timestamp(),
        };
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> DbResult<Task> {
        patch.validate()?;

        let mut state = self.state.lock().await;
        let task = state
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DbError::task_not_found(id))?;

        patch.apply_to(task);
        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> DbResult<()> {
        let mut state = self.state.lock().await;
        state.tasks.retain(|t| t.id != id);
        Ok(())
    }

    async fn max_id(&self) -> DbResult<Option<TaskId>> {
        let state = self.state.lock().await;
        Ok(state.tasks.iter().map(|t| t.id).max())
    }
}
