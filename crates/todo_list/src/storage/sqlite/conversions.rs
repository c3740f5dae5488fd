//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and item records.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use todo_list_core::item::{ItemRecord, Lifecycle};

/// Convert a SQLite row to an ItemRecord.
///
/// Expected columns: id, completed, description, created_at, updated_at, deleted_at
pub fn row_to_item(row: &Row) -> rusqlite::Result<ItemRecord> {
    let id: i64 = row.get(0)?;
    let completed: bool = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let created_at: String = row.get(3)?;
    let updated_at: String = row.get(4)?;
    let deleted_at: Option<String> = row.get(5)?;

    let deleted_at = deleted_at
        .map(|value| parse_datetime(5, &value))
        .transpose()?;

    Ok(ItemRecord {
        id,
        completed,
        description,
        created_at: parse_datetime(3, &created_at)?,
        updated_at: parse_datetime(4, &updated_at)?,
        lifecycle: Lifecycle::from_deleted_at(deleted_at),
    })
}

/// Parse an RFC 3339 timestamp stored in the given column.
fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}
