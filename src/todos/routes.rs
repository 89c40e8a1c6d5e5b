//! REST endpoints for todo items.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use super::handler::TodoHandler;
use super::model::{TodoInput, UpdateBody};
use crate::error::ApiError;

/// Route prefix for the todo collection.
pub const TODO_PATH: &str = "/api/todo";

/// Build the todo REST routes.
pub fn todo_routes(handler: TodoHandler) -> Router {
    Router::new()
        .route(TODO_PATH, get(list_todos).post(create_todo))
        .route(
            &format!("{TODO_PATH}/{{id}}"),
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .with_state(handler)
}

fn path_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|e| ApiError::BadRequest(e.body_text()))
}

/// GET /api/todo
async fn list_todos(State(handler): State<TodoHandler>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(handler.list().await?))
}

/// GET /api/todo/{id}
async fn get_todo(
    State(handler): State<TodoHandler>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = path_id(path)?;
    Ok(Json(handler.get(id).await?))
}

/// POST /api/todo
///
/// Returns 201 with the stored item and a `Location` pointing at it.
async fn create_todo(
    State(handler): State<TodoHandler>,
    body: Result<Json<TodoInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let todo = handler.create(json_body(body)?).await?;
    let location = format!("{TODO_PATH}/{}", todo.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(todo)))
}

/// PUT /api/todo/{id}
///
/// An object body replaces the item; a bare boolean sets only `isCompleted`.
async fn update_todo(
    State(handler): State<TodoHandler>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(path)?;
    match json_body(body)? {
        UpdateBody::Full(input) => handler.replace(id, input).await?,
        UpdateBody::Completion(is_completed) => handler.set_completed(id, is_completed).await?,
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/todo/{id}
async fn delete_todo(
    State(handler): State<TodoHandler>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    handler.delete(path_id(path)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::config::IdMismatchPolicy;
    use crate::store::{LibSqlBackend, TodoStore};

    async fn app() -> Router {
        let store: Arc<dyn TodoStore> = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        todo_routes(TodoHandler::new(store, IdMismatchPolicy::Override))
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, body: &str) -> Value {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/api/todo", body))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        body_json(resp).await
    }

    #[tokio::test]
    async fn list_empty() {
        let app = app().await;
        let resp = app.oneshot(empty_request("GET", "/api/todo")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn create_returns_location() {
        let app = app().await;
        let resp = app
            .oneshot(json_request(
                "POST",
                "/api/todo",
                r#"{"title":"Buy milk","description":"2%","isCompleted":false}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
        let body = body_json(resp).await;
        assert_eq!(location, format!("/api/todo/{}", body["id"]));
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["isCompleted"], false);
    }

    #[tokio::test]
    async fn create_missing_title_is_400_with_field() {
        let app = app().await;
        let resp = app
            .oneshot(json_request("POST", "/api/todo", r#"{"description":"2%"}"#))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["errors"][0]["field"], "title");
        assert_eq!(body["errors"][0]["message"], "Title is required.");
    }

    #[tokio::test]
    async fn malformed_json_is_400() {
        let app = app().await;
        let resp = app
            .oneshot(json_request("POST", "/api/todo", "{not json"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(resp).await["error"].is_string());
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let app = app().await;
        let resp = app
            .oneshot(empty_request("GET", "/api/todo/abc"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_missing_is_404_with_empty_body() {
        let app = app().await;
        let resp = app
            .oneshot(empty_request("GET", "/api/todo/12"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn put_object_replaces() {
        let app = app().await;
        let created = create(&app, r#"{"title":"Buy milk","description":"2%"}"#).await;
        let uri = format!("/api/todo/{}", created["id"]);

        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &uri,
                r#"{"title":"Buy milk","description":"Whole","isCompleted":true}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app.oneshot(empty_request("GET", &uri)).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["description"], "Whole");
        assert_eq!(body["isCompleted"], true);
    }

    #[tokio::test]
    async fn put_bool_sets_completion_only() {
        let app = app().await;
        let created = create(&app, r#"{"title":"Buy milk","description":"2%"}"#).await;
        let uri = format!("/api/todo/{}", created["id"]);

        let resp = app
            .clone()
            .oneshot(json_request("PUT", &uri, "true"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app.oneshot(empty_request("GET", &uri)).await.unwrap();
        let body = body_json(resp).await;
        assert_eq!(body["isCompleted"], true);
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["description"], "2%");
    }

    #[tokio::test]
    async fn put_missing_is_404() {
        let app = app().await;
        let resp = app
            .clone()
            .oneshot(json_request("PUT", "/api/todo/3", "false"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = app
            .oneshot(json_request(
                "PUT",
                "/api/todo/3",
                r#"{"title":"t","description":"d"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_twice() {
        let app = app().await;
        let created = create(&app, r#"{"title":"Buy milk","description":"2%"}"#).await;
        let uri = format!("/api/todo/{}", created["id"]);

        let resp = app
            .clone()
            .oneshot(empty_request("DELETE", &uri))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app.oneshot(empty_request("DELETE", &uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
