//! User Handlers Module
//!
//! HTTP handlers for the `/api/users` endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs           - Module exports and session helper
//! ├── types.rs         - Request and response types
//! ├── register.rs      - POST /register
//! ├── login.rs         - POST /login
//! ├── google_signin.rs - POST /google-signin
//! ├── session.rs       - POST /refresh, POST /forgot-password
//! ├── profile.rs       - GET /profile, PUT /update, DELETE /delete
//! └── admin_users.rs   - /admin/* user management
//! ```
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt before storage
//! - Invalid credentials return 401 without saying which part was wrong
//! - Every successful sign-in replaces the user's stored refresh token

pub mod admin_users;
pub mod google_signin;
pub mod login;
pub mod profile;
pub mod register;
pub mod session;
pub mod types;

pub use admin_users::{
    bulk_delete_users, delete_user, get_user, list_deleted_users, list_users, purge_user, restore_user,
};
pub use google_signin::google_signin;
pub use login::login;
pub use profile::{delete_account, get_profile, update_profile};
pub use register::register;
pub use session::{forgot_password, refresh};

use crate::backend::auth::handlers::types::AuthResponse;
use crate::backend::auth::sessions::Role;
use crate::backend::auth::users::{User, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Trimmed, non-empty value of an optional request field
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Issue both tokens for `user` and persist the refresh token
pub(crate) async fn start_session(app_state: &AppState, user: &User) -> Result<AuthResponse, BackendError> {
    let access_token = app_state.tokens.issue_access(user.id, &user.email, Role::User)?;
    let (refresh_token, expires_at) = app_state.tokens.issue_refresh(user.id, &user.email)?;
    app_state
        .refresh_tokens
        .put_refresh_token(user.id, &refresh_token, expires_at)
        .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        user: UserResponse::from(user),
    })
}
