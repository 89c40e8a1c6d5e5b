//! Persistence layer: SQLite-backed storage for todo items.

pub mod libsql_backend;
pub mod migrations;
pub mod traits;

pub use libsql_backend::LibSqlBackend;
pub use traits::TodoStore;
