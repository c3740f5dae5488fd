//! The JSON body returned with every error response.

use serde::{Deserialize, Serialize};

/// `{"code": <int>, "message": <string>}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: i64,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code: i64::from(code),
            message: message.into(),
        }
    }
}
