//! Health check operations.

use serde::{Deserialize, Serialize};

use super::TodoListClient;
use crate::error::Result;

/// Readiness status reported by `/readyz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyStatus {
    pub healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TodoListClient {
    /// Check that the server accepts connections.
    pub async fn live(&self) -> Result<()> {
        let response = self.client.get(self.url("/livez")).send().await?;
        self.handle_empty_response(response).await
    }

    /// Check that the server can reach its storage.
    ///
    /// An unhealthy server answers 503 with the same body, so both are decoded.
    pub async fn ready(&self) -> Result<ReadyStatus> {
        let response = self.client.get(self.url("/readyz")).send().await?;
        if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        self.handle_response(response).await
    }
}
