//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by resource into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs            - Module exports and documentation
//! ├── router.rs         - Main router creation, layers and fallback
//! ├── user_routes.rs    - /api/users
//! ├── admin_routes.rs   - /api/admin
//! └── staging_routes.rs - /api/straging (alias /api/staging)
//! ```
//!
//! # Authentication Tiers
//!
//! Each resource module splits its routes into up to three groups:
//!
//! 1. **Public** - no token
//! 2. **User** - `auth_middleware` as a route layer (user token, silent
//!    renewal through `x-refresh-token`)
//! 3. **Admin** - `admin_middleware` as a route layer (admin token)
//!
//! A path/method pair belongs to exactly one group.

/// Main router creation
pub mod router;

/// /api/users
pub mod user_routes;

/// /api/admin
pub mod admin_routes;

/// /api/straging, aliased as /api/staging
pub mod staging_routes;

pub use router::create_router;
