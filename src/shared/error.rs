//! Shared Error Types
//!
//! Errors that can be raised outside the HTTP layer: request bodies that fail
//! validation, payloads that fail to (de)serialize, and lookups that come back
//! empty.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - A request field is missing or malformed
//! - `NotFound` - A resource does not exist or is not visible to the caller
//!
//! # Usage
//!
//! ```rust
//! use staging_backend::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email is required");
//! assert_eq!(error.to_string(), "Email is required");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    ///
    /// Displays only the message; the field name is kept for logging.
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Resource not found (or owned by someone else)
    #[error("{resource} not found")]
    NotFound {
        /// Name of the missing resource, e.g. "Staging project"
        resource: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
