/**
 * Profile Handlers
 *
 * Endpoints for the signed-in user's own account:
 * - GET /api/users/profile
 * - PUT /api/users/update
 * - DELETE /api/users/delete (soft delete, revokes the refresh token)
 *
 * A missing account on read answers HTTP 200 with `status: 0`.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::UpdateProfileRequest;
use crate::backend::auth::users::{normalize_email, ProfileUpdate, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::ApiResponse;

pub async fn get_profile(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<ApiResponse<UserResponse>, BackendError> {
    let user = app_state
        .users
        .find_user(auth.user_id)
        .await?
        .filter(|user| !user.is_deleted);

    Ok(match user {
        Some(user) => ApiResponse::success("User profile fetched successfully", UserResponse::from(&user)),
        None => ApiResponse::failure("User not found"),
    })
}

pub async fn update_profile(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<ApiResponse<UserResponse>, BackendError> {
    if request.password.is_some() {
        return Err(BackendError::bad_request("Password cannot be updated from this endpoint"));
    }

    let full_name = request.full_name.map(|name| name.trim().to_string());
    if full_name.as_deref().is_some_and(str::is_empty) {
        return Err(BackendError::bad_request("Full name cannot be empty"));
    }
    let update = ProfileUpdate {
        full_name,
        email: request.email.as_deref().map(normalize_email).transpose()?,
        mobile: request.mobile.map(|mobile| mobile.trim().to_string()),
        profile_img: request.profile_img,
    };

    let updated = app_state
        .users
        .update_user(auth.user_id, &update)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => BackendError::conflict("Email is already in use"),
            other => other.into(),
        })?;

    Ok(match updated {
        Some(user) => {
            tracing::info!(user_id = %user.id, "Profile updated");
            ApiResponse::success("Profile updated successfully", UserResponse::from(&user))
        }
        None => ApiResponse::failure("User not found"),
    })
}

pub async fn delete_account(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
) -> Result<ApiResponse<()>, BackendError> {
    if app_state.users.set_user_deleted(auth.user_id, true).await?.is_none() {
        return Ok(ApiResponse::failure("User not found"));
    }
    app_state.refresh_tokens.revoke_refresh_token(auth.user_id).await?;

    tracing::info!(user_id = %auth.user_id, "Account deleted by owner");
    Ok(ApiResponse::message("Account deleted successfully"))
}
