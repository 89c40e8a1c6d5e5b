//! Request handler: validates payloads, drives the store, and maps outcomes
//! to `ApiError`.
//!
//! The handler owns no mutable state. Cloning it shares the same store.

use std::sync::Arc;

use tracing::{info, warn};

use super::model::{TodoInput, TodoItem};
use super::validation::validate_input;
use crate::config::IdMismatchPolicy;
use crate::error::{ApiError, DatabaseError};
use crate::store::TodoStore;

#[derive(Clone)]
pub struct TodoHandler {
    store: Arc<dyn TodoStore>,
    id_mismatch: IdMismatchPolicy,
}

impl TodoHandler {
    pub fn new(store: Arc<dyn TodoStore>, id_mismatch: IdMismatchPolicy) -> Self {
        Self { store, id_mismatch }
    }

    pub async fn list(&self) -> Result<Vec<TodoItem>, ApiError> {
        Ok(self.store.list_todos().await?)
    }

    pub async fn get(&self, id: i64) -> Result<TodoItem, ApiError> {
        self.store.get_todo(id).await?.ok_or(ApiError::NotFound)
    }

    /// Validate and insert. Any `id` in the payload is ignored.
    pub async fn create(&self, input: TodoInput) -> Result<TodoItem, ApiError> {
        let fields = validate_input(input).map_err(ApiError::Validation)?;
        let todo = self.store.insert_todo(&fields).await?;
        info!(id = todo.id, "Todo created");
        Ok(todo)
    }

    /// Full replace of title, description and completion flag.
    pub async fn replace(&self, id: i64, input: TodoInput) -> Result<(), ApiError> {
        if self.id_mismatch == IdMismatchPolicy::Reject && input.id.is_some_and(|b| b != id) {
            return Err(ApiError::BadRequest(
                "Id in body does not match id in path.".to_string(),
            ));
        }
        let fields = validate_input(input).map_err(ApiError::Validation)?;

        self.get(id).await?;
        let saved = self.store.replace_todo(id, &fields).await;
        Self::finish_save(id, saved)
    }

    /// Set only the completion flag.
    pub async fn set_completed(&self, id: i64, is_completed: bool) -> Result<(), ApiError> {
        self.get(id).await?;
        let saved = self.store.set_todo_completed(id, is_completed).await;
        Self::finish_save(id, saved)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        if self.store.delete_todo(id).await? {
            info!(id, "Todo deleted");
            Ok(())
        } else {
            Err(ApiError::NotFound)
        }
    }

    /// Map a save that followed a successful lookup. A row that vanished in
    /// between counts as a conflict, same as a store-reported one.
    fn finish_save(id: i64, saved: Result<bool, DatabaseError>) -> Result<(), ApiError> {
        match saved {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(id, "Todo disappeared between lookup and save");
                Err(ApiError::Conflict)
            }
            Err(DatabaseError::Conflict(reason)) => {
                warn!(id, reason = %reason, "Write conflict while saving todo");
                Err(ApiError::Conflict)
            }
            Err(e) => Err(ApiError::Storage(e)),
        }
    }
}
