//! `TodoStore` trait: the narrow async interface the request handler depends on.

use async_trait::async_trait;

use crate::error::DatabaseError;
use crate::todos::model::{TodoFields, TodoItem};

/// Backend-agnostic persistence for todo items.
///
/// "Not found" is an expected outcome and is reported through `Option` or a
/// `false` return, never through `Err`.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Run all pending schema migrations.
    async fn init_schema(&self) -> Result<(), DatabaseError>;

    /// All items in insertion order.
    async fn list_todos(&self) -> Result<Vec<TodoItem>, DatabaseError>;

    /// Get an item by ID.
    async fn get_todo(&self, id: i64) -> Result<Option<TodoItem>, DatabaseError>;

    /// Insert a new item and return it with its assigned ID.
    async fn insert_todo(&self, fields: &TodoFields) -> Result<TodoItem, DatabaseError>;

    /// Overwrite title, description and completion flag.
    ///
    /// Returns `false` if no row has this ID. A write that cannot be applied
    /// consistently is `Err(DatabaseError::Conflict)`.
    async fn replace_todo(&self, id: i64, fields: &TodoFields) -> Result<bool, DatabaseError>;

    /// Set only the completion flag. Same contract as [`TodoStore::replace_todo`].
    async fn set_todo_completed(&self, id: i64, is_completed: bool)
    -> Result<bool, DatabaseError>;

    /// Delete an item. Returns `false` if it did not exist.
    async fn delete_todo(&self, id: i64) -> Result<bool, DatabaseError>;
}
