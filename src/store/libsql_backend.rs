//! libSQL backend: async `TodoStore` implementation.
//!
//! Supports local file and in-memory databases.

use std::path::Path;

use async_trait::async_trait;
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::TodoStore;
use crate::todos::model::{TodoFields, TodoItem};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    // Owns the database the connection points at; in-memory databases vanish
    // when this is dropped.
    #[allow(dead_code)]
    db: LibSqlDatabase,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        let backend = Self { db, conn };
        backend.init_schema().await?;
        Ok(backend)
    }

    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

const TODO_COLUMNS: &str = "id, title, description, is_completed";

/// Map a libsql Row to a TodoItem. Column order matches `TODO_COLUMNS`.
fn row_to_todo(row: &libsql::Row) -> Result<TodoItem, DatabaseError> {
    let id: i64 = row
        .get(0)
        .map_err(|e| DatabaseError::Query(format!("todo.id: {e}")))?;
    let title: String = row
        .get(1)
        .map_err(|e| DatabaseError::Query(format!("todo.title: {e}")))?;
    let description: String = row
        .get(2)
        .map_err(|e| DatabaseError::Query(format!("todo.description: {e}")))?;
    let is_completed: i64 = row.get(3).unwrap_or(0);

    Ok(TodoItem {
        id,
        title,
        description,
        is_completed: is_completed != 0,
    })
}

/// Classify a failed write. Busy or locked databases mean the row could not be
/// saved consistently and surface as `Conflict`.
fn write_error(op: &str, e: libsql::Error) -> DatabaseError {
    classify_write_error(op, e.to_string())
}

fn classify_write_error(op: &str, msg: String) -> DatabaseError {
    let lower = msg.to_ascii_lowercase();
    if lower.contains("locked") || lower.contains("busy") {
        DatabaseError::Conflict(format!("{op}: {msg}"))
    } else {
        DatabaseError::Query(format!("{op}: {msg}"))
    }
}

// ── Trait implementation ────────────────────────────────────────────

#[async_trait]
impl TodoStore for LibSqlBackend {
    async fn init_schema(&self) -> Result<(), DatabaseError> {
        migrations::run_migrations(self.conn()).await
    }

    async fn list_todos(&self) -> Result<Vec<TodoItem>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {TODO_COLUMNS} FROM todo_items ORDER BY id ASC"),
                (),
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("list_todos: {e}")))?;

        let mut todos = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DatabaseError::Query(format!("list_todos row: {e}")))?
        {
            todos.push(row_to_todo(&row)?);
        }
        Ok(todos)
    }

    async fn get_todo(&self, id: i64) -> Result<Option<TodoItem>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {TODO_COLUMNS} FROM todo_items WHERE id = ?1"),
                params![id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_todo: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(row_to_todo(&row)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_todo row: {e}"))),
        }
    }

    async fn insert_todo(&self, fields: &TodoFields) -> Result<TodoItem, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "INSERT INTO todo_items (title, description, is_completed) \
                     VALUES (?1, ?2, ?3) RETURNING {TODO_COLUMNS}"
                ),
                params![
                    fields.title.as_str(),
                    fields.description.as_str(),
                    fields.is_completed as i64,
                ],
            )
            .await
            .map_err(|e| write_error("insert_todo", e))?;

        let row = rows
            .next()
            .await
            .map_err(|e| write_error("insert_todo", e))?
            .ok_or_else(|| DatabaseError::Query("insert_todo: no row returned".to_string()))?;
        let todo = row_to_todo(&row)?;

        // Step the statement to completion so the insert commits.
        while rows
            .next()
            .await
            .map_err(|e| write_error("insert_todo", e))?
            .is_some()
        {}

        debug!(id = todo.id, "Todo created");
        Ok(todo)
    }

    async fn replace_todo(&self, id: i64, fields: &TodoFields) -> Result<bool, DatabaseError> {
        let count = self
            .conn()
            .execute(
                "UPDATE todo_items SET title = ?1, description = ?2, is_completed = ?3 WHERE id = ?4",
                params![
                    fields.title.as_str(),
                    fields.description.as_str(),
                    fields.is_completed as i64,
                    id,
                ],
            )
            .await
            .map_err(|e| write_error("replace_todo", e))?;
        debug!(id, updated = count > 0, "Todo replaced");
        Ok(count > 0)
    }

    async fn set_todo_completed(
        &self,
        id: i64,
        is_completed: bool,
    ) -> Result<bool, DatabaseError> {
        let count = self
            .conn()
            .execute(
                "UPDATE todo_items SET is_completed = ?1 WHERE id = ?2",
                params![is_completed as i64, id],
            )
            .await
            .map_err(|e| write_error("set_todo_completed", e))?;
        debug!(id, is_completed, updated = count > 0, "Todo completion set");
        Ok(count > 0)
    }

    async fn delete_todo(&self, id: i64) -> Result<bool, DatabaseError> {
        let count = self
            .conn()
            .execute("DELETE FROM todo_items WHERE id = ?1", params![id])
            .await
            .map_err(|e| write_error("delete_todo", e))?;
        debug!(id, deleted = count > 0, "Todo deleted");
        Ok(count > 0)
    }
}
