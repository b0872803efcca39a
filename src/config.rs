use std::env;
use std::net::SocketAddr;

use crate::error::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://todo.db";
const DEFAULT_TEST_DATABASE_URL: &str = "sqlite::memory:";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub test_database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    /// Reads the service configuration, loading `.env` first when present.
    pub fn new_from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let test_database_url = env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_TEST_DATABASE_URL.to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| AppError::Config(format!("BIND_ADDR is not a socket address: {}", e)))?;

        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| {
                AppError::Config(format!("DB_MAX_CONNECTIONS is not a number: {}", e))
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(AppError::Config(
                "DB_MAX_CONNECTIONS must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            database_url,
            test_database_url,
            bind_addr,
            max_connections,
        })
    }

    /// Points the service at the test database instead of the production one.
    pub fn use_test_database(mut self) -> Self {
        self.database_url = self.test_database_url.clone();
        self
    }
}

/// Base URL of the API as seen by the dashboard.
pub fn api_url_from_env() -> String {
    dotenvy::dotenv().ok();
    env::var("TODO_API_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}
