use thiserror::Error;

use crate::storage::RepositoryError;

use super::ItemId;

/// Errors returned by the item operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("item must be present")]
    MissingItem,
    #[error("not found: item {0}")]
    NotFound(ItemId),
    #[error("cannot create new item: {0}")]
    Create(RepositoryError),
    #[error("cannot load item {id}: {source}")]
    Lookup {
        id: ItemId,
        source: RepositoryError,
    },
    #[error("cannot update item {id}: {source}")]
    Update {
        id: ItemId,
        source: RepositoryError,
    },
    #[error("cannot delete item {id}: {source}")]
    Delete {
        id: ItemId,
        source: RepositoryError,
    },
    #[error("cannot list items: {0}")]
    List(RepositoryError),
}
