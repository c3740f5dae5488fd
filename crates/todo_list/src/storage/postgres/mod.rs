//! Postgres storage backend implementation.
//!
//! This module provides a Postgres-based implementation of `ItemRepository`
//! on top of a bounded `sqlx::PgPool`.

mod error;
mod repository;
mod schema;

pub use repository::PostgresRepository;
