//! Admin Module
//!
//! Admin accounts live apart from users and sign in to a separate set of
//! routes under `/api/admin`.
//!
//! # Module Structure
//!
//! ```text
//! admin/
//! ├── mod.rs      - Module exports
//! ├── accounts.rs - Admin model and reset-token helpers
//! └── handlers.rs - HTTP handlers for /api/admin
//! ```
//!
//! Account lookups that fail answer HTTP 200 with `status: 0` rather than an
//! error status, so the admin panel can show the message inline.

pub mod accounts;
pub mod handlers;

pub use accounts::{Admin, AdminResponse, AdminUpdate, NewAdmin};
