//! TaskForge: a task resource API backed by a relational store, with an
//! in-memory store that takes over when the relational one is unavailable.

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod service;
