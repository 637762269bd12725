//! Shared Module
//!
//! Types used by both the staging core and the HTTP backend. Nothing in here
//! depends on the `server` feature, so the core can be built and tested on
//! its own.
//!
//! # Overview
//!
//! - `error` - validation/serialization errors
//! - `config` - application configuration and its builder
//! - `response` - the `{statusCode, status, message, data}` envelope
//! - `pagination` - page requests and page metadata
//! - `numeric` - lenient number parsing for form and JSON inputs

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// JSON response envelope
pub mod response;

/// Page requests and metadata
pub mod pagination;

/// Numbers that may arrive as strings
pub mod numeric;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use numeric::NumericInput;
pub use pagination::{Page, PageQuery, Pagination};
pub use response::ApiResponse;
