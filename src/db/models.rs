//! Domain models for the task store.
//!
//! These models are storage-agnostic and shared by every backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DbError, DbResult};

/// Task identifier. Assigned by the relational identity column or the
/// in-process counter, never reused within a process lifetime.
pub type TaskId = i64;

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = DbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(DbError::Validation {
                message: format!("Invalid priority '{}' (expected low, medium or high)", s),
            }),
        }
    }
}

/// A single work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    /// Set once at creation, millisecond precision.
    pub created_at: DateTime<Utc>,
}

/// Fields accepted when creating a task. The store sets `created_at` and,
/// unless `id` is given, assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTask {
    /// Explicit id to insert with
    pub id: Option<TaskId>,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Reject tasks whose title is empty or whitespace.
    pub fn validate(&self) -> DbResult<()> {
        if self.title.trim().is_empty() {
            return Err(DbError::Validation {
                message: "Title is required".to_string(),
            });
        }
        Ok(())
    }
}

/// Partial update. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// A patch may omit the title but may not blank it.
    pub fn validate(&self) -> DbResult<()> {
        match &self.title {
            Some(title) if title.trim().is_empty() => Err(DbError::Validation {
                message: "Title cannot be empty".to_string(),
            }),
            _ => Ok(()),
        }
    }

    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = Some(description.clone()).filter(|d| !d.is_empty());
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// A registered account for the demo auth flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    /// SHA-256 hex digest; the clear-text password is never stored.
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
