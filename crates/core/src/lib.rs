//! Core types and operations for the todo-list service.
//!
//! Everything in this crate is storage-agnostic: the item model, pagination,
//! the repository trait implemented by each backend, and the four operations
//! (add, update, delete, list) that the HTTP layer dispatches to.

pub mod envelope;
pub mod item;
pub mod storage;
