//! Field validation for inbound todo payloads.

use serde::Serialize;

use super::model::{TodoFields, TodoInput};

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Check the title: present, non-blank, at most [`MAX_TITLE_LEN`] characters.
pub fn validate_title(title: Option<&str>) -> Option<FieldError> {
    if is_blank(title) {
        return Some(FieldError::new("title", "Title is required."));
    }
    match title {
        Some(t) if t.chars().count() > MAX_TITLE_LEN => Some(FieldError::new(
            "title",
            "Title cannot exceed 100 characters.",
        )),
        _ => None,
    }
}

/// Check the description: present and non-blank.
pub fn validate_description(description: Option<&str>) -> Option<FieldError> {
    is_blank(description).then(|| FieldError::new("description", "Description is required."))
}

/// Validate an inbound payload, collecting every failing field.
pub fn validate_input(input: TodoInput) -> Result<TodoFields, Vec<FieldError>> {
    let errors: Vec<FieldError> = [
        validate_title(input.title.as_deref()),
        validate_description(input.description.as_deref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    match (input.title, input.description) {
        (Some(title), Some(description)) if errors.is_empty() => Ok(TodoFields {
            title,
            description,
            is_completed: input.is_completed,
        }),
        _ => Err(errors),
    }
}
