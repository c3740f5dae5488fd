//! Item API operations.

use serde::Serialize;

use super::TodoListClient;
use crate::error::Result;
use todo_list_core::item::{Item, ItemBody, ItemId};

/// Query for listing items.
#[derive(Debug, Default, Serialize)]
pub struct ListItemsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl TodoListClient {
    /// List a page of items.
    pub async fn list_items(&self, query: ListItemsQuery) -> Result<Vec<Item>> {
        let response = self
            .client
            .get(self.url("/"))
            .query(&query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new item.
    pub async fn add_item(&self, body: &ItemBody) -> Result<Item> {
        let response = self.client.post(self.url("/")).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Update an item. An absent description leaves the stored one unchanged.
    pub async fn update_item(&self, id: ItemId, body: &ItemBody) -> Result<Item> {
        let response = self
            .client
            .put(self.url(&format!("/{}", id)))
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete item by ID.
    pub async fn delete_item(&self, id: ItemId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/{}", id)))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }
}
