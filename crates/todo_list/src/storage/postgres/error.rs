//! Postgres error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `todo_list_core::storage`.

use todo_list_core::item::ItemId;
use todo_list_core::storage::RepositoryError;

/// Maps a sqlx error to a RepositoryError.
///
/// # Error Mapping
///
/// - `RowNotFound` → `RepositoryError::NotFound` (when the ID is known)
/// - Pool, I/O and TLS errors → `RepositoryError::ConnectionFailed`
/// - Decode errors → `RepositoryError::InvalidData`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, id: Option<ItemId>) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => match id {
            Some(id) => RepositoryError::item_not_found(id),
            None => RepositoryError::QueryFailed(err.to_string()),
        },

        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => RepositoryError::ConnectionFailed(err.to_string()),

        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::TypeNotFound { .. } => RepositoryError::InvalidData(err.to_string()),

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
