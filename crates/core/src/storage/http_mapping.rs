//! Pure functions for mapping repository and item errors to HTTP status codes.

use crate::item::ItemError;

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `QueryFailed` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error)
///
/// Rows are written by this service only, so invalid data read back is a
/// server fault rather than a client one.
///
/// # Examples
///
/// ```
/// use todo_list_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::item_not_found(7);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::InvalidData(_) => 500,
    }
}

/// Maps an [`ItemError`] to the HTTP status code of the error envelope.
///
/// Only a missing identity is a 404. A missing item body is reported as a
/// server error, and so is every storage failure, except a write that lost a
/// race with a delete, which surfaces as the 404 the caller would have seen a
/// moment later.
pub fn item_error_to_status_code(error: &ItemError) -> u16 {
    match error {
        ItemError::NotFound(_) => 404,
        ItemError::Update { source, .. } | ItemError::Delete { source, .. }
            if repository_error_to_status_code(source) == 404 =>
        {
            404
        }
        ItemError::MissingItem
        | ItemError::Create(_)
        | ItemError::Lookup { .. }
        | ItemError::Update { .. }
        | ItemError::Delete { .. }
        | ItemError::List(_) => 500,
    }
}
