/**
 * Login Handler
 *
 * POST /api/users/login
 *
 * # Authentication Process
 *
 * 1. Look up the user by normalized email
 * 2. Verify the password using bcrypt
 * 3. Issue an access token and a refresh token
 *
 * Unknown emails, soft-deleted users, Google-only accounts without a
 * password and wrong passwords all answer 401 "Invalid credentials".
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::handlers::{present, start_session};
use crate::backend::auth::users::verify_password;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiResponse<AuthResponse>, BackendError> {
    let (Some(email), Some(password)) = (present(&request.email), request.password.as_deref()) else {
        return Err(BackendError::bad_request("Email and password are required"));
    };
    let email = email.to_lowercase();
    tracing::info!("Login request for: {}", email);

    let user = app_state
        .users
        .find_user_by_email(&email)
        .await?
        .filter(|user| !user.is_deleted)
        .ok_or_else(|| {
            tracing::warn!("User not found or deleted: {}", email);
            BackendError::unauthorized("Invalid credentials")
        })?;

    let valid = user
        .password_hash
        .as_deref()
        .is_some_and(|hash| verify_password(password, hash));
    if !valid {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthorized("Invalid credentials"));
    }

    let session = start_session(&app_state, &user).await?;
    Ok(ApiResponse::success("Login successful", session))
}
