use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use todo_list_core::envelope::ErrorBody;
use todo_list_core::item::ItemError;
use todo_list_core::storage::item_error_to_status_code;

/// Error returned by the item handlers, rendered as the JSON error envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Item(#[from] ItemError),
    /// The request itself could not be decoded.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Item(e) => StatusCode::from_u16(item_error_to_status_code(e))
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "API error");
        } else {
            tracing::warn!(status = %status, error = %message, "API error");
        }

        (status, Json(ErrorBody::new(status.as_u16(), message))).into_response()
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(format!("invalid item id: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(format!("invalid query: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use todo_list_core::storage::RepositoryError;

    async fn render(error: AppError) -> (StatusCode, ErrorBody) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = render(ItemError::NotFound(3).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, ErrorBody::new(404, "not found: item 3"));
    }

    #[tokio::test]
    async fn test_storage_failure_envelope() {
        let error = ItemError::Create(RepositoryError::QueryFailed("disk full".to_string()));

        let (status, body) = render(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, 500);
        assert_eq!(body.message, "cannot create new item: Query failed: disk full");
    }

    #[tokio::test]
    async fn test_bad_request_envelope() {
        let (status, body) = render(AppError::BadRequest("invalid item body".to_string())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, ErrorBody::new(400, "invalid item body"));
    }
}
