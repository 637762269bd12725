//! Backend Module
//!
//! This module contains all server-side code: the Axum HTTP server, its
//! routes and middleware, authentication, persistence and upload storage.
//! It is only compiled when the `server` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, optional services
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - User accounts, JWT sessions, Google sign-in, mail
//! - **`admin`** - Admin accounts
//! - **`projects`** - Staging project handlers
//! - **`store`** - Persistence traits with Postgres and in-memory backends
//! - **`upload`** - Multipart reading and image storage
//! - **`middleware`** - Bearer token authentication
//! - **`error`** - `BackendError` and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs       - Module exports and documentation
//! ├── main.rs      - staging-server binary
//! ├── server/      - Server initialization and state
//! ├── routes/      - Route configuration
//! ├── auth/        - Users and sessions
//! ├── admin/       - Admin accounts
//! ├── projects/    - Staging project handlers
//! ├── store/       - Persistence
//! ├── upload/      - Uploads
//! ├── middleware/  - Request middleware
//! └── error/       - Error types
//! ```
//!
//! # Error Handling
//!
//! Handlers return `Result<ApiResponse<T>, BackendError>`. Failures render
//! as `{ statusCode, message }`; server-side failures are logged with their
//! detail and reported to the client as "Internal server error".

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Users, sessions and identity providers
pub mod auth;

/// Admin accounts
pub mod admin;

/// Staging project handlers
pub mod projects;

/// Persistence
pub mod store;

/// Upload handling
pub mod upload;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::{create_app, AppState};
