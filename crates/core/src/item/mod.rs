mod error;
mod operations;
mod types;

pub use error::ItemError;
pub use operations::{
    add_item, delete_item, list_items, update_item, ListErrorPolicy, ParseListErrorPolicyError,
};
pub use types::{Item, ItemBody, ItemId, ItemRecord, Lifecycle, NewItem};
