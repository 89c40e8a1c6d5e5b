//! Todo data model: the stored item and inbound payloads.

use serde::{Deserialize, Serialize};

/// A single to-do item as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    /// Store-assigned ID. Never reused.
    pub id: i64,
    /// Short title, at most 100 characters.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// Whether the item is done.
    #[serde(default)]
    pub is_completed: bool,
}

/// Validated, id-less field set written by insert and full replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

impl TodoFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            is_completed: false,
        }
    }

    /// Builder: set the completion flag.
    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Attach a store-assigned ID.
    pub fn into_item(self, id: i64) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            description: self.description,
            is_completed: self.is_completed,
        }
    }
}

/// Inbound payload for create and full update.
///
/// Every field is optional on the wire so a missing `title` or `description`
/// is reported as a validation failure rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

/// Body of `PUT /api/todo/{id}`.
///
/// A bare JSON boolean is a completion-only update; an object is a full
/// replace.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UpdateBody {
    Completion(bool),
    Full(TodoInput),
}
