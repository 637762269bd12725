//! JSON response envelope
//!
//! Every successful response (and every "benign" failure) is wrapped as
//! `{ "statusCode": 200, "status": 1, "message": "...", "data": ... }`.
//! `status` is `1` for success and `0` for a handled failure that is still
//! reported with HTTP 200, such as looking up an account that does not exist.

use serde::{Deserialize, Serialize};

/// Response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// 1 on success, 0 on a benign failure
    pub status: u8,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 200 with data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: 200,
            status: 1,
            message: message.into(),
            data: Some(data),
        }
    }

    /// 201 with data
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self {
            status_code: 201,
            ..Self::success(message, data)
        }
    }

    /// 200 without data
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            status: 1,
            message: message.into(),
            data: None,
        }
    }

    /// 200 with `status: 0`
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            status: 0,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 1
    }
}
