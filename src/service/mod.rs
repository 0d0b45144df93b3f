//! Business logic between the HTTP layer and the stores.
//!
//! - `tasks`: validation, backend selection and fallback mirroring
//! - `auth`: register/login over the in-memory user map

mod auth;
mod error;
mod tasks;

#[cfg(test)]
mod auth_test;

pub use auth::{AuthService, AuthSession, Credentials, PublicUser, Registration};
pub use error::{ServiceError, ServiceResult};
pub use tasks::{CreateTask, Health, ReadPolicy, TaskService};
