//! Item CLI commands.

use clap::{Parser, Subcommand};

use todo_list_core::item::{ItemBody, ItemId};

/// Todo item management commands.
#[derive(Debug, Parser)]
pub struct ItemsCommand {
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Available item actions.
#[derive(Debug, Subcommand)]
pub enum ItemsAction {
    /// List a page of items.
    List {
        /// Number of items to skip.
        #[arg(long)]
        since: Option<u64>,
        /// Maximum number of items to return.
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Create a new item.
    Add {
        /// Item description.
        #[arg(long)]
        description: Option<String>,
        /// Mark the item as completed.
        #[arg(long)]
        completed: bool,
    },
    /// Update an item.
    ///
    /// The completion flag is always written; omit --completed to clear it.
    Update {
        /// Item ID.
        id: ItemId,
        /// New description (unchanged when omitted).
        #[arg(long)]
        description: Option<String>,
        /// Mark the item as completed.
        #[arg(long)]
        completed: bool,
    },
    /// Delete item by ID.
    Delete {
        /// Item ID.
        id: ItemId,
    },
}

/// Builds the request body sent by `add` and `update`.
pub fn item_body(description: Option<String>, completed: bool) -> ItemBody {
    ItemBody {
        completed,
        description,
    }
}
