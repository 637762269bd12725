//! Staging Backend - Main Library
//!
//! REST backend for virtual room staging. Users upload photos of a property
//! and annotate them with areas (rooms/views), hotspots linking one area to
//! another, info markers and placeable furniture items.
//!
//! # Module Structure
//!
//! - **`staging`** - The project document and its graph consistency rules
//!   - Areas, hotspots, info markers, library items and placements
//!   - Image-field relocation between the project and its areas
//!   - Cascading and single-hop deletes
//!
//! - **`shared`** - Types used by every layer
//!   - Error types, response envelope, pagination, configuration
//!
//! - **`backend`** - Server-side code (only compiled with `server` feature)
//!   - Axum HTTP server, routing and middleware
//!   - User/admin authentication (bcrypt + JWT, Google ID tokens)
//!   - Document store (Postgres or in-memory) and upload storage
//!
//! # Feature Flags
//!
//! - **`server`** (default) - enables the backend modules and the
//!   `staging-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use staging_backend::backend::server::init::create_app;
//! use staging_backend::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `staging::GraphError` for rule violations inside a project document
//! - `shared::SharedError` for validation and serialization failures
//! - `backend::error::BackendError` for everything that reaches HTTP

/// Shared types and data structures
pub mod shared;

/// Project document model and graph consistency layer
pub mod staging;

/// Backend server-side code
#[cfg(feature = "server")]
pub mod backend;
