//! In-memory storage backend.
//!
//! Rows live in a `BTreeMap` keyed by ID, so iteration order is storage
//! order. Nothing is persisted; data is lost when the repository is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use todo_list::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
