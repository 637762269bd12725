//! Authentication Module
//!
//! User accounts, sessions and the external identity and mail services they
//! rely on.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs      - Module exports and documentation
//! ├── users.rs    - User model, email/password rules, bcrypt helpers
//! ├── sessions.rs - TokenService: access and refresh JWTs
//! ├── google.rs   - Google ID token verification
//! ├── mailer.rs   - SMTP mail with a log-only fallback
//! └── handlers/   - HTTP handlers for /api/users
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register / Login / Google sign-in** → access token (7 days by
//!    default) and refresh token (30 days), the latter stored per user
//! 2. **Authenticated requests** carry `Authorization: Bearer <access>`
//! 3. **Expired access token** → `POST /refresh` or an `x-refresh-token`
//!    header yields a 15 minute access token

pub mod google;
pub mod handlers;
pub mod mailer;
pub mod sessions;
pub mod users;

pub use sessions::{Claims, Role, TokenService};
pub use users::{User, UserResponse};
