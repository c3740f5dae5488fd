//! Postgres repository implementation.
//!
//! Implements `ItemRepository` from `todo_list_core::storage` using sqlx.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    PgPool, Row,
};

use todo_list_core::item::{ItemId, ItemRecord, Lifecycle, NewItem};
use todo_list_core::storage::{ItemRepository, Page, RepositoryError, Result};

use super::error::map_sqlx_error;
use super::schema;

/// Postgres-based repository implementation backed by a connection pool.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Connects a bounded pool and creates the schema if it is missing.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::from_pool(pool).await
    }

    /// Wraps an existing pool and creates the schema if it is missing.
    pub async fn from_pool(pool: PgPool) -> Result<Self> {
        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// Initialize the database schema.
    async fn init_schema(pool: &PgPool) -> Result<()> {
        for statement in schema::CREATE_TABLES {
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(|e| map_sqlx_error(e, None))?;
        }
        Ok(())
    }
}

/// Convert a Postgres row to an ItemRecord.
fn row_to_item(row: &PgRow) -> std::result::Result<ItemRecord, sqlx::Error> {
    let deleted_at: Option<DateTime<Utc>> = row.try_get("deleted_at")?;

    Ok(ItemRecord {
        id: row.try_get("id")?,
        completed: row.try_get("completed")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        lifecycle: Lifecycle::from_deleted_at(deleted_at),
    })
}

// ============================================================================
// ItemRepository implementation
// ============================================================================

#[async_trait]
impl ItemRepository for PostgresRepository {
    async fn insert_item(&self, item: &NewItem) -> Result<ItemRecord> {
        let row = sqlx::query(schema::INSERT_ITEM)
            .bind(item.completed)
            .bind(item.description.as_deref())
            .bind(item.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, None))?;

        let id: ItemId = row.try_get("id").map_err(|e| map_sqlx_error(e, None))?;

        Ok(item.clone().into_record(id))
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<ItemRecord>> {
        let row = sqlx::query(schema::SELECT_ITEM_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, Some(id)))?;

        row.as_ref()
            .map(row_to_item)
            .transpose()
            .map_err(|e| map_sqlx_error(e, Some(id)))
    }

    async fn update_item(&self, item: &ItemRecord) -> Result<()> {
        let result = sqlx::query(schema::UPDATE_ITEM)
            .bind(item.id)
            .bind(item.completed)
            .bind(item.description.as_deref())
            .bind(item.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, Some(item.id)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::item_not_found(item.id));
        }
        Ok(())
    }

    async fn soft_delete_item(&self, id: ItemId, at: DateTime<Utc>) -> Result<()> {
        let result = sqlx::query(schema::SOFT_DELETE_ITEM)
            .bind(id)
            .bind(at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, Some(id)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::item_not_found(id));
        }
        Ok(())
    }

    async fn list_items(&self, page: Page) -> Result<Vec<ItemRecord>> {
        let rows = sqlx::query(schema::SELECT_ITEMS_PAGE)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, None))?;

        rows.iter()
            .map(row_to_item)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error(e, None))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query(schema::PING)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}
