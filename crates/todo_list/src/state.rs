//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Storage sits behind a repository trait object whose
//! concrete backend is picked by feature flag.

use std::{sync::Arc, time::Duration};

use todo_list_core::item::ListErrorPolicy;
use todo_list_core::storage::ItemRepository;

use crate::config::Config;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "postgres"))]
compile_error!("Cannot enable both 'sqlite' and 'postgres' storage features");

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(all(feature = "postgres", feature = "inmemory"))]
compile_error!("Cannot enable both 'postgres' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite", feature = "postgres")))]
compile_error!("Must enable exactly one storage feature: 'inmemory', 'sqlite', or 'postgres'");

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Item repository for the active storage backend.
    pub item_repo: Arc<dyn ItemRepository>,
    /// What `GET /` answers when storage fails.
    pub list_error_policy: ListErrorPolicy,
    /// Page size when `limit` is not given.
    pub default_page_size: u32,
    /// Upper bound on the time spent serving one request.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState with the given repository and configuration.
    pub fn build(item_repo: Arc<dyn ItemRepository>, config: &Config) -> Self {
        Self {
            item_repo,
            list_error_policy: config.list_error_policy,
            default_page_size: config.default_page_size,
            request_timeout: config.request_timeout(),
        }
    }

    /// Closes the storage connections.
    ///
    /// Called once the server has stopped accepting requests.
    pub async fn close(&self) {
        match self.item_repo.close().await {
            Ok(()) => tracing::info!("Storage closed"),
            Err(e) => tracing::error!(error = %e, "Failed to close storage"),
        }
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!("Using in-memory storage");
            let repo = Arc::new(InMemoryRepository::new());
            Ok(Self::build(repo, config))
        }
    }
}

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            Ok(Self::build(repo, config))
        }
    }
}

#[cfg(feature = "postgres")]
mod postgres_backend {
    use super::*;
    use crate::storage::PostgresRepository;

    impl AppState {
        /// Creates AppState with Postgres storage.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            tracing::info!(
                max_connections = config.database_max_connections,
                "Using Postgres storage"
            );
            let repo = Arc::new(
                PostgresRepository::connect(
                    &config.database_url,
                    config.database_max_connections,
                    config.database_acquire_timeout(),
                )
                .await?,
            );
            Ok(Self::build(repo, config))
        }
    }
}
