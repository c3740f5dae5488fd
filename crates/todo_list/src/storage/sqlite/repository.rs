//! SQLite repository implementation.
//!
//! Implements `ItemRepository` from `todo_list_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_rusqlite::Connection;

use todo_list_core::item::{ItemId, ItemRecord, NewItem};
use todo_list_core::storage::{ItemRepository, Page, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_item};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// All statements run on the single background thread owned by the
/// `tokio_rusqlite::Connection`.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// ItemRepository implementation
// ============================================================================

#[async_trait]
impl ItemRepository for SqliteRepository {
    async fn insert_item(&self, item: &NewItem) -> Result<ItemRecord> {
        let completed = item.completed;
        let description = item.description.clone();
        let created_at = format_datetime(&item.created_at);

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_ITEM,
                    rusqlite::params![completed, description, created_at],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(item.clone().into_record(id))
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<ItemRecord>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_ITEM_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_item) {
                    Ok(item) => Ok(Some(item)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn update_item(&self, item: &ItemRecord) -> Result<()> {
        let id = item.id;
        let completed = item.completed;
        let description = item.description.clone();
        let updated_at = format_datetime(&item.updated_at);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_ITEM,
                        rusqlite::params![id, completed, description, updated_at],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }

    async fn soft_delete_item(&self, id: ItemId, at: DateTime<Utc>) -> Result<()> {
        let deleted_at = format_datetime(&at);

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::SOFT_DELETE_ITEM, rusqlite::params![id, deleted_at])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id))
    }

    async fn list_items(&self, page: Page) -> Result<Vec<ItemRecord>> {
        let limit = page.limit_i64();
        let offset = page.offset_i64();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_ITEMS_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([limit, offset], row_to_item)
                    .map_err(wrap_err)?;

                let mut items = Vec::new();
                for row_result in rows {
                    items.push(row_result.map_err(wrap_err)?);
                }
                Ok(items)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }

    async fn close(&self) -> Result<()> {
        self.conn
            .clone()
            .close()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}
