//! Backend Error Module
//!
//! Errors returned by handlers and middleware, and their HTTP conversion.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status mapping
//! └── conversion.rs - IntoResponse for BackendError and ApiResponse
//! ```
//!
//! Handlers return `Result<ApiResponse<T>, BackendError>`; both sides render
//! as JSON with a `statusCode` field.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
