use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::item::{ItemId, ItemRecord, NewItem};

use super::{Page, Result};

/// Repository for todo item rows.
///
/// Every read only sees active rows. Soft-deleted rows stay in storage but
/// behave as if they were absent.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts a new row and returns it with its store-assigned ID.
    async fn insert_item(&self, item: &NewItem) -> Result<ItemRecord>;

    /// Gets an active item by its ID.
    async fn get_item(&self, id: ItemId) -> Result<Option<ItemRecord>>;

    /// Writes the mutable columns of an active item.
    ///
    /// Returns `NotFound` if the row is missing or soft-deleted.
    async fn update_item(&self, item: &ItemRecord) -> Result<()>;

    /// Marks an active item as deleted at the given instant.
    ///
    /// Returns `NotFound` if the row is missing or already deleted.
    async fn soft_delete_item(&self, id: ItemId, at: DateTime<Utc>) -> Result<()>;

    /// Lists active items ordered by ID within the given window.
    async fn list_items(&self, page: Page) -> Result<Vec<ItemRecord>>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Releases the underlying connections.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
