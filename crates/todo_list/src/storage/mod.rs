//! Storage backend implementations.
//!
//! This module provides concrete implementations of `ItemRepository` from
//! `todo_list_core::storage`. The backend is selected at compile time via
//! feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): rows kept in process memory
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `postgres`: Postgres storage backend using `sqlx`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p todo_list --no-default-features --features sqlite
//! ```
//!
//! Build with Postgres:
//! ```bash
//! cargo build -p todo_list --no-default-features --features postgres
//! ```

// The in-memory backend also backs the router tests of every build.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRepository;
