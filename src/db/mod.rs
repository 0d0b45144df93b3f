//! Task storage layer.
//!
//! Storage is abstracted behind the [`TaskStore`] trait so the service layer
//! can run against a relational backend, the in-process fallback, or both.
//!
//! # Architecture
//!
//! - `error`: Storage-agnostic error types
//! - `models`: Domain entities (Task, Priority, User)
//! - `repository`: The `TaskStore` contract
//! - `memory`: Mutex-guarded in-process store
//! - `sql`: sqlx `AnyPool` store (MySQL in production, SQLite locally)
//! - `users`: Process-wide user map for the demo auth flow

mod error;
mod memory;
mod models;
mod repository;
pub mod sql;
mod users;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;


pub use error::{DbError, DbResult};
pub use memory::MemoryTaskStore;
pub use models::*;
pub use repository::TaskStore;
pub use sql::SqlTaskStore;
pub use users::{UserStore, hash_password};
