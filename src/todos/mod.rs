//! Todo items: model, validation, request handler, and REST routes.

pub mod handler;
pub mod model;
pub mod routes;
pub mod validation;

pub use handler::TodoHandler;
pub use model::{TodoFields, TodoInput, TodoItem, UpdateBody};
pub use routes::todo_routes;
