/**
 * Session Handlers
 *
 * - POST /api/users/refresh - exchange a refresh token for a new access token
 * - POST /api/users/forgot-password - acknowledge a reset request
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::present;
use crate::backend::auth::handlers::types::{ForgotPasswordRequest, RefreshRequest, RefreshResponse};
use crate::backend::auth::users::normalize_email;
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::renew_access;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

pub async fn refresh(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<ApiResponse<RefreshResponse>, BackendError> {
    let refresh_token = present(&request.refresh_token)
        .ok_or_else(|| BackendError::bad_request("Refresh token is required"))?;

    let (claims, access_token) = renew_access(&app_state, refresh_token).await?;
    let user_id = claims.subject()?;
    let active = app_state
        .users
        .find_user(user_id)
        .await?
        .is_some_and(|user| !user.is_deleted);
    if !active {
        return Err(BackendError::unauthorized("Invalid refresh token"));
    }

    Ok(ApiResponse::success(
        "Token refreshed successfully",
        RefreshResponse { access_token },
    ))
}

/// Users reset passwords out of band; the request is only logged.
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    let email = present(&request.email).ok_or_else(|| BackendError::bad_request("Email is required"))?;
    let email = normalize_email(email)?;

    match app_state.users.find_user_by_email(&email).await? {
        Some(user) if !user.is_deleted => {
            tracing::info!(user_id = %user.id, "Password reset requested")
        }
        _ => tracing::info!("Password reset requested for unknown email"),
    }

    Ok(ApiResponse::message(
        "If the email is registered, password reset instructions have been sent",
    ))
}
