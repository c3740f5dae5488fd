//! todo_list_client - CLI client for the todo-list API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::TodoListClient;
pub use error::{ClientError, Result};
