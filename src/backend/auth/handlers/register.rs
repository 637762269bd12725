/**
 * Register Handler
 *
 * POST /api/users/register
 *
 * # Registration Process
 *
 * 1. Require `fullName`, `email` and `password`
 * 2. Normalize the email and enforce the password rules
 * 3. Reject an email that is already registered (409)
 * 4. Hash the password with bcrypt at the configured cost
 * 5. Create the user and start a session
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, RegisterRequest};
use crate::backend::auth::handlers::{present, start_session};
use crate::backend::auth::users::{hash_password, normalize_email, validate_password, AuthProvider, NewUser};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::ApiResponse;

pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<ApiResponse<AuthResponse>, BackendError> {
    let (Some(full_name), Some(email), Some(password)) = (
        present(&request.full_name),
        present(&request.email),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Err(BackendError::bad_request("Full name, email and password are required"));
    };

    let email = normalize_email(email)?;
    validate_password(password)?;
    tracing::info!("Registration request for: {}", email);

    if app_state.users.find_user_by_email(&email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(BackendError::conflict("User already exists with this email"));
    }

    let password_hash = hash_password(password, app_state.config.bcrypt_cost)?;
    let user = app_state
        .users
        .create_user(NewUser {
            email,
            full_name: Some(full_name.to_string()),
            mobile: present(&request.mobile).map(str::to_string),
            password_hash: Some(password_hash),
            profile_img: None,
            google_uid: None,
            auth_provider: AuthProvider::Email,
            is_email_verified: false,
        })
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => BackendError::conflict("User already exists with this email"),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "User registered");
    let session = start_session(&app_state, &user).await?;
    Ok(ApiResponse::created("User registered successfully", session))
}
