//! Standardized API response envelope.
//!
//! Every response carries `{ success, data?, message?, error?, timestamp }`.
//! `error` is the failure-taxonomy tag (`VALIDATION_ERROR`, `NOT_FOUND`,
//! `CONFLICT`, `UNAUTHORIZED`, `FORBIDDEN`, `SERVER_ERROR`); `message` is a
//! short human-readable explanation.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// API response wrapper used for success and failure alike.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            timestamp: now(),
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
            timestamp: now(),
        }
    }

    pub fn failure(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: Some(error.into()),
            timestamp: now(),
        }
    }
}

impl ApiResponse<()> {
    /// Success with a message and no payload (update/delete confirmations).
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
            timestamp: now(),
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}
