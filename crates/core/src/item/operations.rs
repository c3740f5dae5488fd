use std::str::FromStr;

use chrono::Utc;
use thiserror::Error;

use crate::storage::{ItemRepository, Page};

use super::error::ItemError;
use super::types::{Item, ItemBody, ItemId, NewItem};

/// Creates a new item from the request body.
pub async fn add_item(
    repo: &dyn ItemRepository,
    body: Option<ItemBody>,
) -> Result<Item, ItemError> {
    let body = body.ok_or(ItemError::MissingItem)?;
    let new_item = NewItem::from_body(body, Utc::now());

    let record = repo
        .insert_item(&new_item)
        .await
        .map_err(ItemError::Create)?;

    Ok(record.to_item())
}

/// Updates an active item and returns its new state.
pub async fn update_item(
    repo: &dyn ItemRepository,
    id: ItemId,
    body: Option<ItemBody>,
) -> Result<Item, ItemError> {
    let body = body.ok_or(ItemError::MissingItem)?;

    let mut record = repo
        .get_item(id)
        .await
        .map_err(|source| ItemError::Lookup { id, source })?
        .ok_or(ItemError::NotFound(id))?;

    record.apply(&body, Utc::now());

    repo.update_item(&record)
        .await
        .map_err(|source| ItemError::Update { id, source })?;

    Ok(record.to_item())
}

/// Soft-deletes an active item.
pub async fn delete_item(repo: &dyn ItemRepository, id: ItemId) -> Result<(), ItemError> {
    repo.get_item(id)
        .await
        .map_err(|source| ItemError::Lookup { id, source })?
        .ok_or(ItemError::NotFound(id))?;

    repo.soft_delete_item(id, Utc::now())
        .await
        .map_err(|source| ItemError::Delete { id, source })
}

/// Lists a window of active items in storage order.
///
/// Storage errors are returned as-is; callers decide what to do with them
/// through a [`ListErrorPolicy`].
pub async fn list_items(repo: &dyn ItemRepository, page: Page) -> Result<Vec<Item>, ItemError> {
    let records = repo.list_items(page).await.map_err(ItemError::List)?;
    Ok(records.iter().map(|record| record.to_item()).collect())
}

/// What the list endpoint does when storage fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListErrorPolicy {
    /// Answer with an empty list.
    #[default]
    Swallow,
    /// Answer with the error envelope.
    Propagate,
}

impl ListErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListErrorPolicy::Swallow => "swallow",
            ListErrorPolicy::Propagate => "propagate",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown list error policy: {0} (expected \"swallow\" or \"propagate\")")]
pub struct ParseListErrorPolicyError(pub String);

impl FromStr for ListErrorPolicy {
    type Err = ParseListErrorPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "swallow" => Ok(ListErrorPolicy::Swallow),
            "propagate" => Ok(ListErrorPolicy::Propagate),
            _ => Err(ParseListErrorPolicyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use tokio::sync::Mutex;

    use super::*;
    use crate::item::ItemRecord;
    use crate::storage::{RepositoryError, Result as RepoResult};

    /// Minimal repository keeping rows in a map.
    #[derive(Default)]
    struct MapRepository {
        rows: Mutex<BTreeMap<ItemId, ItemRecord>>,
    }

    #[async_trait]
    impl ItemRepository for MapRepository {
        async fn insert_item(&self, item: &NewItem) -> RepoResult<ItemRecord> {
            let mut rows = self.rows.lock().await;
            let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            let record = item.clone().into_record(id);
            rows.insert(id, record.clone());
            Ok(record)
        }

        async fn get_item(&self, id: ItemId) -> RepoResult<Option<ItemRecord>> {
            let rows = self.rows.lock().await;
            Ok(rows.get(&id).filter(|r| r.is_active()).cloned())
        }

        async fn update_item(&self, item: &ItemRecord) -> RepoResult<()> {
            let mut rows = self.rows.lock().await;
            match rows.get_mut(&item.id).filter(|r| r.is_active()) {
                Some(row) => {
                    *row = item.clone();
                    Ok(())
                }
                None => Err(RepositoryError::item_not_found(item.id)),
            }
        }

        async fn soft_delete_item(&self, id: ItemId, at: DateTime<Utc>) -> RepoResult<()> {
            let mut rows = self.rows.lock().await;
            match rows.get_mut(&id).filter(|r| r.is_active()) {
                Some(row) => {
                    row.soft_delete(at);
                    Ok(())
                }
                None => Err(RepositoryError::item_not_found(id)),
            }
        }

        async fn list_items(&self, page: Page) -> RepoResult<Vec<ItemRecord>> {
            let rows = self.rows.lock().await;
            Ok(page.slice(rows.values().filter(|r| r.is_active()).cloned()))
        }
    }

    /// Repository whose every call fails.
    struct BrokenRepository;

    fn broken() -> RepositoryError {
        RepositoryError::QueryFailed("connection reset".to_string())
    }

    #[async_trait]
    impl ItemRepository for BrokenRepository {
        async fn insert_item(&self, _item: &NewItem) -> RepoResult<ItemRecord> {
            Err(broken())
        }

        async fn get_item(&self, _id: ItemId) -> RepoResult<Option<ItemRecord>> {
            Err(broken())
        }

        async fn update_item(&self, _item: &ItemRecord) -> RepoResult<()> {
            Err(broken())
        }

        async fn soft_delete_item(&self, _id: ItemId, _at: DateTime<Utc>) -> RepoResult<()> {
            Err(broken())
        }

        async fn list_items(&self, _page: Page) -> RepoResult<Vec<ItemRecord>> {
            Err(broken())
        }
    }

    // ==================== Add Tests ====================

    #[tokio::test]
    async fn test_add_item_assigns_id() {
        let repo = MapRepository::default();

        let item = add_item(&repo, Some(ItemBody::new("buy milk")))
            .await
            .unwrap();

        assert_eq!(item.id, 1);
        assert!(!item.completed);
        assert_eq!(item.description.as_deref(), Some("buy milk"));

        let listed = list_items(&repo, Page::default()).await.unwrap();
        assert_eq!(listed, vec![item]);
    }

    #[tokio::test]
    async fn test_add_item_without_description_stores_null() {
        let repo = MapRepository::default();

        let item = add_item(&repo, Some(ItemBody::default())).await.unwrap();

        assert_eq!(item.description, None);
        let stored = repo.get_item(item.id).await.unwrap().unwrap();
        assert_eq!(stored.description, None);
    }

    #[tokio::test]
    async fn test_add_item_requires_body() {
        let repo = MapRepository::default();
        let err = add_item(&repo, None).await.unwrap_err();
        assert_eq!(err, ItemError::MissingItem);
    }

    #[tokio::test]
    async fn test_add_item_storage_failure() {
        let err = add_item(&BrokenRepository, Some(ItemBody::new("x")))
            .await
            .unwrap_err();
        assert_eq!(err, ItemError::Create(broken()));
        assert!(err.to_string().starts_with("cannot create new item: "));
    }

    // ==================== Update Tests ====================

    #[tokio::test]
    async fn test_update_item_keeps_description_when_absent() {
        let repo = MapRepository::default();
        let created = add_item(&repo, Some(ItemBody::new("test"))).await.unwrap();

        let body = ItemBody {
            completed: true,
            description: None,
        };
        let updated = update_item(&repo, created.id, Some(body)).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert!(updated.completed);
        assert_eq!(updated.description.as_deref(), Some("test"));
    }

    #[tokio::test]
    async fn test_update_item_bumps_updated_at() {
        let repo = MapRepository::default();
        let created = add_item(&repo, Some(ItemBody::new("test"))).await.unwrap();
        let before = repo.get_item(created.id).await.unwrap().unwrap();

        update_item(&repo, created.id, Some(ItemBody::new("changed")))
            .await
            .unwrap();

        let after = repo.get_item(created.id).await.unwrap().unwrap();
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.description.as_deref(), Some("changed"));
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let repo = MapRepository::default();

        let err = update_item(&repo, 42, Some(ItemBody::new("x")))
            .await
            .unwrap_err();

        assert_eq!(err, ItemError::NotFound(42));
        assert!(list_items(&repo, Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_requires_body_before_lookup() {
        let err = update_item(&BrokenRepository, 1, None).await.unwrap_err();
        assert_eq!(err, ItemError::MissingItem);
    }

    #[tokio::test]
    async fn test_update_lookup_failure() {
        let err = update_item(&BrokenRepository, 1, Some(ItemBody::default()))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ItemError::Lookup {
                id: 1,
                source: broken()
            }
        );
    }

    #[tokio::test]
    async fn test_update_deleted_item_is_not_found() {
        let repo = MapRepository::default();
        let created = add_item(&repo, Some(ItemBody::new("gone"))).await.unwrap();
        delete_item(&repo, created.id).await.unwrap();

        let err = update_item(&repo, created.id, Some(ItemBody::default()))
            .await
            .unwrap_err();

        assert_eq!(err, ItemError::NotFound(created.id));
    }

    // ==================== Delete Tests ====================

    #[tokio::test]
    async fn test_delete_item_hides_it_from_list() {
        let repo = MapRepository::default();
        let keep = add_item(&repo, Some(ItemBody::new("keep"))).await.unwrap();
        let removed = add_item(&repo, Some(ItemBody::new("drop"))).await.unwrap();

        delete_item(&repo, removed.id).await.unwrap();

        let listed = list_items(&repo, Page::default()).await.unwrap();
        assert_eq!(listed, vec![keep]);

        // The row is still there, only marked.
        let rows = repo.rows.lock().await;
        assert!(!rows[&removed.id].is_active());
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let repo = MapRepository::default();
        let created = add_item(&repo, Some(ItemBody::new("once"))).await.unwrap();

        delete_item(&repo, created.id).await.unwrap();
        let err = delete_item(&repo, created.id).await.unwrap_err();

        assert_eq!(err, ItemError::NotFound(created.id));
    }

    #[tokio::test]
    async fn test_delete_storage_failure() {
        let err = delete_item(&BrokenRepository, 5).await.unwrap_err();
        assert_eq!(
            err,
            ItemError::Lookup {
                id: 5,
                source: broken()
            }
        );
    }

    // ==================== List Tests ====================

    #[tokio::test]
    async fn test_list_items_pagination() {
        let repo = MapRepository::default();
        for n in 0..5 {
            add_item(&repo, Some(ItemBody::new(format!("item {n}"))))
                .await
                .unwrap();
        }

        let first = list_items(&repo, Page::new(0, 2)).await.unwrap();
        assert_eq!(first.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);

        let rest = list_items(&repo, Page::new(3, 10)).await.unwrap();
        assert_eq!(rest.iter().map(|i| i.id).collect::<Vec<_>>(), vec![4, 5]);

        let none = list_items(&repo, Page::new(0, 0)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_list_items_storage_failure() {
        let err = list_items(&BrokenRepository, Page::default())
            .await
            .unwrap_err();
        assert_eq!(err, ItemError::List(broken()));
    }

    // ==================== Policy Tests ====================

    #[test]
    fn test_list_error_policy_from_str() {
        assert_eq!(
            "swallow".parse::<ListErrorPolicy>(),
            Ok(ListErrorPolicy::Swallow)
        );
        assert_eq!(
            " Propagate ".parse::<ListErrorPolicy>(),
            Ok(ListErrorPolicy::Propagate)
        );
        assert!("retry".parse::<ListErrorPolicy>().is_err());
    }

    #[test]
    fn test_list_error_policy_default() {
        assert_eq!(ListErrorPolicy::default(), ListErrorPolicy::Swallow);
        assert_eq!(ListErrorPolicy::default().as_str(), "swallow");
    }
}
