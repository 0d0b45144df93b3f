//! Relational TaskStore implementation.

use sqlx::Row;
use sqlx::any::AnyRow;

use super::{Dialect, SqlTaskStore};
use crate::db::utils::{current_timestamp, format_timestamp, parse_timestamp};
use crate::db::{DbError, DbResult, NewTask, Task, TaskId, TaskPatch, TaskStore};

const SELECT_COLUMNS: &str = "SELECT id, title, description, completed, priority, created_at FROM tasks";

fn database_error(e: sqlx::Error) -> DbError {
    DbError::Database {
        message: e.to_string(),
    }
}

fn row_to_task(row: &AnyRow) -> DbResult<Task> {
    let created_at: String = row.try_get("created_at").map_err(database_error)?;
    let priority: String = row.try_get("priority").map_err(database_error)?;
    let completed: i64 = row.try_get("completed").map_err(database_error)?;

    Ok(Task {
        id: row.try_get("id").map_err(database_error)?,
        title: row.try_get("title").map_err(database_error)?,
        description: row.try_get("description").map_err(database_error)?,
        completed: completed != 0,
        priority: priority.parse().map_err(|_| DbError::InvalidData {
            message: format!("stored priority '{}' is not low, medium or high", priority),
        })?,
        created_at: parse_timestamp(&created_at)?,
    })
}

impl SqlTaskStore {
    async fn get(&self, id: TaskId) -> DbResult<Task> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .ok_or_else(|| DbError::task_not_found(id))?;

        row_to_task(&row)
    }
}

impl TaskStore for SqlTaskStore {
    const BACKEND: &'static str = "relational";

    async fn list(&self) -> DbResult<Vec<Task>> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC, id ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.iter().map(row_to_task).collect()
    }

    async fn create(&self, task: &NewTask) -> DbResult<Task> {
        task.validate()?;

        let description = task.description.clone().filter(|d| !d.is_empty());
        let created_at = current_timestamp();

        let columns = match task.id {
            Some(_) => "id, title, description, completed, priority, created_at",
            None => "title, description, completed, priority, created_at",
        };
        let placeholders = match task.id {
            Some(_) => "?, ?, ?, ?, ?, ?",
            None => "?, ?, ?, ?, ?",
        };
        // The Any driver only reports last_insert_id for MySQL.
        let returning = match (self.dialect(), task.id) {
            (Dialect::Sqlite, None) => " RETURNING id",
            _ => "",
        };
        let sql = format!(
            "INSERT INTO tasks ({}) VALUES ({}){}",
            columns, placeholders, returning
        );

        let mut query = sqlx::query::<sqlx::Any>(&sql);
        if let Some(id) = task.id {
            query = query.bind(id);
        }
        let query = query
            .bind(task.title.clone())
            .bind(description.clone())
            .bind(i64::from(task.completed))
            .bind(task.priority.as_str())
            .bind(format_timestamp(&created_at));

        let id = match (task.id, self.dialect()) {
            (Some(id), _) => {
                query.execute(&self.pool).await.map_err(database_error)?;
                id
            }
            (None, Dialect::Sqlite) => {
                let row = query.fetch_one(&self.pool).await.map_err(database_error)?;
                row.try_get("id").map_err(database_error)?
            }
            (None, Dialect::MySql) => query
                .execute(&self.pool)
                .await
                .map_err(database_error)?
                .last_insert_id()
                .ok_or_else(|| DbError::Database {
                    message: "backend did not report an inserted id".to_string(),
                })?,
        };

        Ok(Task {
            id,
            title: task.title.clone(),
            description,
            completed: task.completed,
            priority: task.priority,
            created_at,
        })
    }

    async fn update(&self, id: TaskId, patch: &TaskPatch) -> DbResult<Task> {
        patch.validate()?;

        // MySQL reports changed rather than matched rows, so existence is
        // read first.
        let mut task = self.get(id).await?;
        if patch.is_empty() {
            return Ok(task);
        }
        patch.apply_to(&mut task);

        let result =
            sqlx::query("UPDATE tasks SET title = ?, description = ?, completed = ? WHERE id = ?")
                .bind(task.title.clone())
                .bind(task.description.clone())
                .bind(i64::from(task.completed))
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(database_error)?;

        // Zero rows is either an unchanged row (MySQL) or a concurrent delete.
        if result.rows_affected() == 0 {
            self.get(id).await?;
        }

        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(DbError::task_not_found(id));
        }
        Ok(())
    }

    async fn max_id(&self) -> DbResult<Option<TaskId>> {
        self.fetch_max_id().await
    }
}
