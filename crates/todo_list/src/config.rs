use std::{env, time::Duration};

use todo_list_core::item::ListErrorPolicy;
use todo_list_core::storage::DEFAULT_PAGE_SIZE;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string (default: "postgres://localhost/todo_list?sslmode=disable")
    /// Note: Only used when the `postgres` feature is enabled.
    #[allow(dead_code)]
    pub database_url: String,
    /// Maximum pool size (default: 10)
    #[allow(dead_code)]
    pub database_max_connections: u32,
    /// Seconds to wait for a pooled connection (default: 5)
    #[allow(dead_code)]
    pub database_acquire_timeout_seconds: u64,
    /// Path to SQLite database file (default: "todo_list.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// What `GET /` answers when storage fails (default: swallow)
    pub list_error_policy: ListErrorPolicy,
    /// Page size when `limit` is not given (default: 20)
    pub default_page_size: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - Postgres connection string
    /// - `DATABASE_MAX_CONNECTIONS` - Pool size (default: 10)
    /// - `DATABASE_ACQUIRE_TIMEOUT_SECONDS` - Pool acquire timeout (default: 5)
    /// - `SQLITE_PATH` - SQLite database path (default: "todo_list.db")
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `LIST_ERROR_POLICY` - `swallow` or `propagate` (default: swallow)
    /// - `DEFAULT_PAGE_SIZE` - List page size (default: 20)
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| {
                "postgres://localhost/todo_list?sslmode=disable".to_string()
            }),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            database_acquire_timeout_seconds: env::var("DATABASE_ACQUIRE_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "todo_list.db".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            list_error_policy: parse_list_error_policy(env::var("LIST_ERROR_POLICY").ok()),
            default_page_size: env::var("DEFAULT_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get the pool acquire timeout as a Duration.
    #[allow(dead_code)]
    pub fn database_acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.database_acquire_timeout_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Unknown values fall back to the default policy.
fn parse_list_error_policy(value: Option<String>) -> ListErrorPolicy {
    match value {
        None => ListErrorPolicy::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Ignoring LIST_ERROR_POLICY");
            ListErrorPolicy::default()
        }),
    }
}
