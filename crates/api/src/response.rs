//! Shared response envelope for API handlers.
//!
//! Successful responses use `{ "success": true, "data": ..., "message"?: ... }`.
//! Errors are produced by [`crate::error::AppError`] with `success: false`.

use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// `{ success: true, data }`.
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// `{ success: true, data, message }`.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// `{ success: true, message }` without a data payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}
