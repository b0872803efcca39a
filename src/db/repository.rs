use sqlx::SqlitePool;
use tracing::instrument;

use crate::models::{NewTodoRequest, Todo, UpdateTodoRequest};

pub async fn fetch_todos(db: &SqlitePool) -> Result<Vec<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>("SELECT id, title, description FROM todos ORDER BY id ASC")
        .fetch_all(db)
        .await
}

pub async fn find_todo_by_id(db: &SqlitePool, id: i64) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>("SELECT id, title, description FROM todos WHERE id = ?1")
        .bind(id)
        .fetch_optional(db)
        .await
}

#[instrument(skip(db, req))]
pub async fn insert_todo(db: &SqlitePool, req: NewTodoRequest) -> Result<Todo, sqlx::Error> {
    let mut tx = db.begin().await?;

    let todo = sqlx::query_as::<_, Todo>(
        r#"
        INSERT INTO todos (title, description)
        VALUES (?1, ?2)
        RETURNING id, title, description
        "#,
    )
    .bind(req.title)
    .bind(req.description)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(todo)
}

/// Applies a merge-patch: `None` fields keep their stored value.
///
/// Returns `None` without writing anything when no row has `id`.
#[instrument(skip(db, req))]
pub async fn update_todo(
    db: &SqlitePool,
    id: i64,
    req: UpdateTodoRequest,
) -> Result<Option<Todo>, sqlx::Error> {
    let mut tx = db.begin().await?;

    let updated = sqlx::query_as::<_, Todo>(
        r#"
        UPDATE todos
        SET title = COALESCE(?1, title),
            description = COALESCE(?2, description)
        WHERE id = ?3
        RETURNING id, title, description
        "#,
    )
    .bind(req.title)
    .bind(req.description)
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?;

    if updated.is_some() {
        tx.commit().await?;
    }
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_todo(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let mut tx = db.begin().await?;

    let result = sqlx::query("DELETE FROM todos WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if result > 0 {
        tx.commit().await?;
    }
    Ok(result > 0)
}
