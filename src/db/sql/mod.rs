//! Relational task store on an sqlx `AnyPool`.
//!
//! MySQL is the production target; SQLite URLs are accepted for local runs
//! and tests. Queries stick to `?` placeholders and portable column types so
//! the same SQL runs on both.

mod connection;
mod task;


pub use connection::{Dialect, SqlTaskStore};
