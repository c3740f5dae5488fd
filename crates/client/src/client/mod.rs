//! HTTP client for the todo-list API.

pub mod health;
pub mod items;

use todo_list_core::envelope::ErrorBody;

use crate::error::{ClientError, Result};

/// HTTP client for the todo-list API.
#[derive(Debug, Clone)]
pub struct TodoListClient {
    client: reqwest::Client,
    base_url: String,
}

impl TodoListClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from environment (TODO_LIST_URL or default).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("TODO_LIST_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
        Self::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(read_error(response).await)
        }
    }

    /// Handle responses with no body expected.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        if response.status().is_success() {
            Ok(())
        } else {
            Err(read_error(response).await)
        }
    }
}

async fn read_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    error_from_body(status, &text)
}

/// Builds a client error from a failed response.
///
/// Bodies in the `{"code", "message"}` envelope contribute their message;
/// anything else is passed through verbatim.
fn error_from_body(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|envelope| envelope.message)
        .unwrap_or_else(|_| body.to_string());

    if status == 404 {
        ClientError::NotFound { message }
    } else {
        ClientError::ServerError { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let client = TodoListClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.url("/7"), "http://localhost:3000/7");
    }

    #[test]
    fn test_not_found_envelope() {
        let error = error_from_body(404, r#"{"code":404,"message":"not found: item 7"}"#);
        assert!(matches!(
            error,
            ClientError::NotFound { ref message } if message == "not found: item 7"
        ));
    }

    #[test]
    fn test_server_error_envelope() {
        let error = error_from_body(500, r#"{"code":500,"message":"item must be present"}"#);
        match error {
            ClientError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "item must be present");
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn test_non_envelope_body() {
        let error = error_from_body(408, "Request Timeout");
        assert_eq!(error.to_string(), "Server returned 408: Request Timeout");
    }
}
