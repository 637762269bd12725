/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler and
 * middleware in the backend. Lower layers keep their own error enums
 * (`GraphError`, `SharedError`, `StoreError`, `UploadError`, `TokenError`)
 * and convert into `BackendError` with `?`.
 *
 * # Status Mapping
 *
 * - Validation failures map to 400
 * - Missing graph entities map to 404
 * - Duplicate accounts map to 409
 * - Store, IO and token-encoding failures map to 500 and are reported to the
 *   client with a generic message; the detail only goes to the log
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::sessions::TokenError;
use crate::backend::store::StoreError;
use crate::backend::upload::UploadError;
use crate::shared::SharedError;
use crate::staging::GraphError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error raised directly by a handler with an explicit status
    #[error("{message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Message returned to the client
        message: String,
    },

    /// Violation reported by the staging graph
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Shared error (validation, serialization, not found)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Rejected or failed upload
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Token could not be issued or checked
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Anything else that should surface as a 500
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Graph(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Graph(_) => StatusCode::BAD_REQUEST,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::SharedError(SharedError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::SharedError(SharedError::SerializationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upload(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Upload(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Token(TokenError::Expired) | Self::Token(TokenError::Invalid) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent to the client.
    ///
    /// Server-side failures are reduced to a generic message.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() {
            return "Internal server error".to_string();
        }
        self.to_string()
    }
}
