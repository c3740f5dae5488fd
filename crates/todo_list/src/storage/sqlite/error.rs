//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from `todo_list_core::storage`.

use todo_list_core::item::ItemId;
use todo_list_core::storage::RepositoryError;

/// Maps a rusqlite error to a RepositoryError.
///
/// # Error Mapping
///
/// - `QueryReturnedNoRows` → `RepositoryError::NotFound` (when the ID is known)
/// - `CannotOpen` → `RepositoryError::ConnectionFailed`
/// - Column conversion failures → `RepositoryError::InvalidData`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, id: Option<ItemId>) -> RepositoryError {
    match err {
        rusqlite::Error::QueryReturnedNoRows => match id {
            Some(id) => RepositoryError::item_not_found(id),
            None => RepositoryError::QueryFailed(err.to_string()),
        },

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        rusqlite::Error::FromSqlConversionFailure(..) | rusqlite::Error::InvalidColumnType(..) => {
            RepositoryError::InvalidData(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

fn map_error(err: tokio_rusqlite::Error, id: Option<ItemId>) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, id),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a RepositoryError.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> RepositoryError {
    map_error(err, None)
}

/// Maps a tokio_rusqlite error for a statement on a known item.
///
/// A statement that touched no rows becomes `NotFound` for that item.
pub fn map_tokio_rusqlite_error_with_id(err: tokio_rusqlite::Error, id: ItemId) -> RepositoryError {
    map_error(err, Some(id))
}
