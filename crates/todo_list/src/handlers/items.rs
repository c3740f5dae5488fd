//! Item CRUD handlers.
//!
//! Each handler decodes the request, runs one operation from
//! `todo_list_core::item` against the repository in `AppState`, and maps the
//! outcome to a response.

use axum::{
    body::Bytes,
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use todo_list_core::item::{self as item_ops, Item, ItemBody, ItemId, ListErrorPolicy};
use todo_list_core::storage::Page;

use crate::{handlers::AppError, state::AppState};

/// Query parameters for listing items.
#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    /// Number of live items to skip (default: 0)
    pub since: Option<u64>,
    /// Page size (default: the configured page size)
    pub limit: Option<u32>,
}

/// Decodes an item body.
///
/// An empty body and a JSON `null` both decode to `None`, which the
/// operations reject as a missing item.
fn parse_item_body(body: &[u8]) -> Result<Option<ItemBody>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(body)
        .map_err(|e| AppError::BadRequest(format!("invalid item body: {e}")))
}

// ============================================================================
// Add Item
// ============================================================================

/// Create a new item (POST /).
pub async fn add_item(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), AppError> {
    let body = parse_item_body(&body)?;
    tracing::debug!(body = ?body, "Received add item request");

    let item = item_ops::add_item(state.item_repo.as_ref(), body).await?;

    tracing::info!(item_id = item.id, "Created new item");
    Ok((StatusCode::CREATED, Json(item)))
}

// ============================================================================
// Update Item
// ============================================================================

/// Update an item (PUT /{id}).
pub async fn update_item(
    State(state): State<AppState>,
    path: Result<Path<ItemId>, PathRejection>,
    body: Bytes,
) -> Result<Json<Item>, AppError> {
    let Path(id) = path?;
    let body = parse_item_body(&body)?;
    tracing::debug!(item_id = id, body = ?body, "Received update item request");

    let item = item_ops::update_item(state.item_repo.as_ref(), id, body).await?;

    tracing::info!(item_id = id, completed = item.completed, "Updated item");
    Ok(Json(item))
}

// ============================================================================
// Delete Item
// ============================================================================

/// Soft-delete an item (DELETE /{id}).
pub async fn delete_item(
    State(state): State<AppState>,
    path: Result<Path<ItemId>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = path?;
    tracing::debug!(item_id = id, "Received delete item request");

    item_ops::delete_item(state.item_repo.as_ref(), id).await?;

    tracing::info!(item_id = id, "Deleted item");
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// List Items
// ============================================================================

/// List a page of items (GET /).
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> Result<Json<Vec<Item>>, AppError> {
    let Query(query) = query?;
    let page = Page::new(
        query.since.unwrap_or(0),
        query.limit.unwrap_or(state.default_page_size),
    );
    tracing::debug!(since = page.since, limit = page.limit, "Received list items request");

    match item_ops::list_items(state.item_repo.as_ref(), page).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => match state.list_error_policy {
            ListErrorPolicy::Swallow => {
                tracing::warn!(error = %e, "Listing failed, returning an empty page");
                Ok(Json(Vec::new()))
            }
            ListErrorPolicy::Propagate => Err(e.into()),
        },
    }
}
