//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use todo_list_core::item::{ItemId, ItemRecord, NewItem};
use todo_list_core::storage::{ItemRepository, Page, RepositoryError, Result};

/// In-memory storage backend.
///
/// Soft-deleted rows are kept in the map and filtered out on every read.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    items: Arc<RwLock<BTreeMap<ItemId, ItemRecord>>>,
    next_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryRepository {
    async fn insert_item(&self, item: &NewItem) -> Result<ItemRecord> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = item.clone().into_record(id);

        let mut items = self.items.write().await;
        items.insert(id, record.clone());
        Ok(record)
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<ItemRecord>> {
        let items = self.items.read().await;
        Ok(items.get(&id).filter(|item| item.is_active()).cloned())
    }

    async fn update_item(&self, item: &ItemRecord) -> Result<()> {
        let mut items = self.items.write().await;
        match items.get_mut(&item.id) {
            Some(existing) if existing.is_active() => {
                existing.completed = item.completed;
                existing.description = item.description.clone();
                existing.updated_at = item.updated_at;
                Ok(())
            }
            _ => Err(RepositoryError::item_not_found(item.id)),
        }
    }

    async fn soft_delete_item(&self, id: ItemId, at: DateTime<Utc>) -> Result<()> {
        let mut items = self.items.write().await;
        match items.get_mut(&id) {
            Some(existing) if existing.is_active() => {
                existing.soft_delete(at);
                Ok(())
            }
            _ => Err(RepositoryError::item_not_found(id)),
        }
    }

    async fn list_items(&self, page: Page) -> Result<Vec<ItemRecord>> {
        let items = self.items.read().await;
        Ok(page.slice(items.values().filter(|item| item.is_active()).cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_list_core::item::{ItemBody, Lifecycle};

    fn new_item(description: &str) -> NewItem {
        NewItem::from_body(ItemBody::new(description), Utc::now())
    }

    // ==================== Insert Tests ====================

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let repo = InMemoryRepository::new();

        let first = repo.insert_item(&new_item("a")).await.unwrap();
        let second = repo.insert_item(&new_item("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(second.lifecycle, Lifecycle::Active);
    }

    #[tokio::test]
    async fn test_get_item_missing() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_item(7).await.unwrap().is_none());
    }

    // ==================== Update Tests ====================

    #[tokio::test]
    async fn test_update_item() {
        let repo = InMemoryRepository::new();
        let mut record = repo.insert_item(&new_item("a")).await.unwrap();

        record.completed = true;
        record.description = Some("b".to_string());
        repo.update_item(&record).await.unwrap();

        let stored = repo.get_item(record.id).await.unwrap().unwrap();
        assert!(stored.completed);
        assert_eq!(stored.description.as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_update_missing_item() {
        let repo = InMemoryRepository::new();
        let record = new_item("ghost").into_record(99);

        let result = repo.update_item(&record).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    // ==================== Delete Tests ====================

    #[tokio::test]
    async fn test_soft_delete_hides_item() {
        let repo = InMemoryRepository::new();
        let record = repo.insert_item(&new_item("a")).await.unwrap();

        repo.soft_delete_item(record.id, Utc::now()).await.unwrap();

        assert!(repo.get_item(record.id).await.unwrap().is_none());
        assert!(repo.list_items(Page::default()).await.unwrap().is_empty());

        // The row itself is kept.
        let items = repo.items.read().await;
        assert!(items[&record.id].lifecycle.deleted_at().is_some());
    }

    #[tokio::test]
    async fn test_soft_delete_twice() {
        let repo = InMemoryRepository::new();
        let record = repo.insert_item(&new_item("a")).await.unwrap();

        repo.soft_delete_item(record.id, Utc::now()).await.unwrap();
        let result = repo.soft_delete_item(record.id, Utc::now()).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_deleted_item() {
        let repo = InMemoryRepository::new();
        let record = repo.insert_item(&new_item("a")).await.unwrap();
        repo.soft_delete_item(record.id, Utc::now()).await.unwrap();

        let result = repo.update_item(&record).await;

        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    // ==================== List Tests ====================

    #[tokio::test]
    async fn test_list_skips_deleted_rows_before_paging() {
        let repo = InMemoryRepository::new();
        for name in ["a", "b", "c", "d"] {
            repo.insert_item(&new_item(name)).await.unwrap();
        }
        repo.soft_delete_item(2, Utc::now()).await.unwrap();

        let page = repo.list_items(Page::new(1, 2)).await.unwrap();
        let ids: Vec<ItemId> = page.iter().map(|item| item.id).collect();

        assert_eq!(ids, vec![3, 4]);
    }
}
