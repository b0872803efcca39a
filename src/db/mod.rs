pub mod repository;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::config::Config;

const CREATE_TODOS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL
    )
"#;

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Opens a pool for `url`.
///
/// Every connection to an in-memory SQLite URL gets its own private database,
/// so those pools are pinned to a single connection that is never recycled.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let pool = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

pub async fn connect_with_config(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    connect(&config.database_url, config.max_connections).await
}

/// Creates the `todos` table if it does not exist yet. Safe to call on every start.
pub async fn init_schema(db: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("creating tables");
    sqlx::query(CREATE_TODOS_TABLE).execute(db).await?;
    info!("tables created");
    Ok(())
}

#[cfg(test)]
pub(crate) async fn setup_test_db() -> SqlitePool {
    let pool = connect("sqlite::memory:", 1)
        .await
        .expect("Failed to create test db");

    init_schema(&pool).await.expect("Failed to create schema");

    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://:memory:"));
        assert!(is_in_memory("sqlite://file:todos?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://todo.db"));
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let pool = setup_test_db().await;
        init_schema(&pool).await.expect("second init failed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM todos")
            .fetch_one(&pool)
            .await
            .expect("todos table missing");
        assert_eq!(count.0, 0);
    }
}
