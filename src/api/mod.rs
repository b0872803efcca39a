pub mod extract;

use std::time::Instant;

use axum::Json;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, post, put};
use axum::{Router, extract::State, routing::get};
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

use self::extract::{AppJson, AppPath};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/add/", post(create_todo))
        .route("/read/", get(list_todos))
        .route("/delete/{id}", delete(delete_todo))
        .route("/update/{id}", put(update_todo))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );
    response
}

async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse::new(WELCOME_MESSAGE))
}

async fn create_todo(
    State(state): State<AppState>,
    AppJson(req): AppJson<NewTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let todo = repository::insert_todo(&state.db, req).await?;
    Ok(Json(todo))
}

async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    let todos = repository::fetch_todos(&state.db).await?;
    Ok(Json(todos))
}

async fn delete_todo(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let ok = repository::delete_todo(&state.db, id).await?;
    if ok {
        Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
    } else {
        Err(AppError::todo_not_found())
    }
}

async fn update_todo(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let todo = repository::update_todo(&state.db, id, req)
        .await?
        .ok_or_else(AppError::todo_not_found)?;
    Ok(Json(todo))
}
