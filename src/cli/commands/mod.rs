pub mod auth;
pub mod system;
pub mod task;

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;
