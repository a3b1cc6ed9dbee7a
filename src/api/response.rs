//! JSON response envelope
//!
//! Every response, success or failure, is wrapped as
//! `{code, message, status?, data?}` where `code` mirrors the HTTP status.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code: code.as_u16(),
            message: message.into(),
            status: None,
            data: Some(data),
        }
    }

    pub fn error(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: code.as_u16(),
            message: message.into(),
            status: None,
            data: None,
        }
    }

    /// Mark the response with `status: "success"`
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}
