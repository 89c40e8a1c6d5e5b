//! Todo Service: CRUD REST API over a SQLite-backed item store.

pub mod app;
pub mod config;
pub mod error;
pub mod store;
pub mod todos;
