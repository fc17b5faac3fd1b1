//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "success": ..., "message": ..., "data": ... }`
//! envelope. Use [`ApiResponse`] instead of ad-hoc `serde_json::json!` to get
//! compile-time type safety and consistent serialization. (The login proxy is
//! the one exception: it passes the tracker's payload through unwrapped.)

use serde::Serialize;

/// Standard success envelope. `data` is omitted when there is nothing to return.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A successful envelope carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}
