//! Middleware Module
//!
//! This module contains the HTTP middleware for the backend server.
//!
//! - **`auth`** - `auth_middleware` for user routes, `admin_middleware` for
//!   admin routes, and the `AuthUser` / `AuthAdmin` extractors handlers use
//!   to read the caller
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//!
//! let protected = Router::new()
//!     .route("/api/users/profile", get(get_profile))
//!     .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{admin_middleware, auth_middleware, AuthAdmin, AuthUser, AuthenticatedAdmin, AuthenticatedUser};
