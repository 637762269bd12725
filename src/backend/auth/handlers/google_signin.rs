/**
 * Google Sign-In Handler
 *
 * POST /api/users/google-signin
 *
 * The ID token is verified by the configured `IdentityVerifier`. The account
 * is then found by Google uid, or by email (linking the Google uid to the
 * existing account), or created as a `google` account.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::google::IdentityError;
use crate::backend::auth::handlers::types::{AuthResponse, GoogleSignInRequest};
use crate::backend::auth::handlers::{present, start_session};
use crate::backend::auth::users::{normalize_email, AuthProvider, NewUser, User};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

pub async fn google_signin(
    State(app_state): State<AppState>,
    Json(request): Json<GoogleSignInRequest>,
) -> Result<ApiResponse<AuthResponse>, BackendError> {
    let id_token = present(&request.id_token)
        .ok_or_else(|| BackendError::bad_request("Google ID token is required"))?;

    let profile = app_state.identity.verify(id_token).await.map_err(|e| match e {
        IdentityError::Rejected => BackendError::unauthorized("Invalid Google token"),
        IdentityError::NotConfigured => {
            BackendError::handler(StatusCode::SERVICE_UNAVAILABLE, "Google sign-in is not configured")
        }
        IdentityError::Transport(err) => BackendError::internal(format!("Google tokeninfo request failed: {}", err)),
    })?;
    let email = normalize_email(&profile.email)?;

    let user = match app_state.users.find_user_by_google_uid(&profile.uid).await? {
        Some(user) => user,
        None => match app_state.users.find_user_by_email(&email).await? {
            Some(existing) => {
                tracing::info!(user_id = %existing.id, "Linking Google account to existing user");
                app_state
                    .users
                    .link_google(existing.id, &profile.uid, profile.email_verified)
                    .await?
                    .ok_or_else(|| BackendError::internal("user vanished while linking Google account"))?
            }
            None => {
                let user = app_state
                    .users
                    .create_user(NewUser {
                        email,
                        full_name: profile.name.clone(),
                        mobile: None,
                        password_hash: None,
                        profile_img: profile.picture.clone(),
                        google_uid: Some(profile.uid.clone()),
                        auth_provider: AuthProvider::Google,
                        is_email_verified: profile.email_verified,
                    })
                    .await?;
                tracing::info!(user_id = %user.id, "User created from Google sign-in");
                user
            }
        },
    };

    ensure_active(&user)?;
    let session = start_session(&app_state, &user).await?;
    Ok(ApiResponse::success("Google sign-in successful", session))
}

fn ensure_active(user: &User) -> Result<(), BackendError> {
    if user.is_deleted {
        tracing::warn!(user_id = %user.id, "Deleted user attempted Google sign-in");
        return Err(BackendError::forbidden("Account has been deleted"));
    }
    Ok(())
}
