/**
 * Admin Handlers
 *
 * Endpoints under /api/admin:
 * - POST /login, POST /create - issue an admin access token
 * - GET /profile, PUT /update - the signed-in admin's own account
 * - POST /forgot-password - mail a reset link
 * - POST /reset-password - set a new password (admin token required)
 */

use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::backend::admin::accounts::{
    generate_reset_token, reset_token_expiry, AdminResponse, AdminUpdate, NewAdmin,
};
use crate::backend::auth::handlers::present;
use crate::backend::auth::mailer::reset_password_email;
use crate::backend::auth::sessions::Role;
use crate::backend::auth::users::{hash_password, normalize_email, verify_password};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthAdmin;
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::ApiResponse;

#[derive(Deserialize, Debug, Default)]
pub struct AdminLoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub profile_img: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_img: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdminEmailRequest {
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResetPasswordRequest {
    pub password: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub access_token: String,
    pub admin: AdminResponse,
}

pub async fn admin_login(
    State(app_state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Result<ApiResponse<AdminSession>, BackendError> {
    let (Some(email), Some(password)) = (present(&request.email), request.password.as_deref()) else {
        return Ok(ApiResponse::failure("Email and password are required"));
    };
    let email = email.to_lowercase();

    let Some(admin) = app_state.admins.find_admin_by_email(&email).await? else {
        tracing::warn!("Admin not found: {}", email);
        return Ok(ApiResponse::failure("Admin not found"));
    };
    if !verify_password(password, &admin.password_hash) {
        tracing::warn!("Invalid password for admin: {}", email);
        return Ok(ApiResponse::failure("Invalid credentials"));
    }

    let access_token = app_state.tokens.issue_access(admin.id, &admin.email, Role::Admin)?;
    tracing::info!(admin_id = %admin.id, "Admin signed in");
    Ok(ApiResponse::success(
        "Login successful",
        AdminSession {
            access_token,
            admin: AdminResponse::from(&admin),
        },
    ))
}

pub async fn create_admin(
    State(app_state): State<AppState>,
    Json(request): Json<CreateAdminRequest>,
) -> Result<ApiResponse<AdminSession>, BackendError> {
    let (Some(first_name), Some(last_name), Some(email), Some(password)) = (
        present(&request.first_name),
        present(&request.last_name),
        present(&request.email),
        request.password.as_deref().filter(|p| !p.is_empty()),
    ) else {
        return Ok(ApiResponse::failure("All fields are required"));
    };
    let email = normalize_email(email)?;

    if app_state.admins.find_admin_by_email(&email).await?.is_some() {
        return Ok(ApiResponse::failure("Admin already exists"));
    }

    let password_hash = hash_password(password, app_state.config.bcrypt_cost)?;
    let created = app_state
        .admins
        .create_admin(NewAdmin {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            password_hash,
            profile_img: present(&request.profile_img).map(str::to_string),
        })
        .await;
    let admin = match created {
        Ok(admin) => admin,
        Err(StoreError::Conflict(_)) => return Ok(ApiResponse::failure("Admin already exists")),
        Err(e) => return Err(e.into()),
    };

    let access_token = app_state.tokens.issue_access(admin.id, &admin.email, Role::Admin)?;
    tracing::info!(admin_id = %admin.id, "Admin created");
    Ok(ApiResponse::created(
        "Admin created successfully",
        AdminSession {
            access_token,
            admin: AdminResponse::from(&admin),
        },
    ))
}

pub async fn admin_profile(
    State(app_state): State<AppState>,
    AuthAdmin(auth): AuthAdmin,
) -> Result<ApiResponse<AdminResponse>, BackendError> {
    Ok(match app_state.admins.find_admin(auth.admin_id).await? {
        Some(admin) => ApiResponse::success("Profile fetched successfully", AdminResponse::from(&admin)),
        None => ApiResponse::failure("Admin not found"),
    })
}

/// Passwords only change through the reset flow.
pub async fn update_admin(
    State(app_state): State<AppState>,
    AuthAdmin(auth): AuthAdmin,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<ApiResponse<AdminResponse>, BackendError> {
    let update = AdminUpdate {
        first_name: present(&request.first_name).map(str::to_string),
        last_name: present(&request.last_name).map(str::to_string),
        email: present(&request.email).map(normalize_email).transpose()?,
        profile_img: present(&request.profile_img).map(str::to_string),
    };

    let updated = app_state
        .admins
        .update_admin(auth.admin_id, &update)
        .await
        .map_err(|e| match e {
            StoreError::Conflict(_) => BackendError::conflict("Email is already in use"),
            other => other.into(),
        })?;

    Ok(match updated {
        Some(admin) => ApiResponse::success("Admin updated successfully", AdminResponse::from(&admin)),
        None => ApiResponse::failure("Admin not found"),
    })
}

pub async fn admin_forgot_password(
    State(app_state): State<AppState>,
    Json(request): Json<AdminEmailRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    let Some(email) = present(&request.email) else {
        return Ok(ApiResponse::failure("Email is required"));
    };
    let email = email.to_lowercase();

    let Some(admin) = app_state.admins.find_admin_by_email(&email).await? else {
        return Ok(ApiResponse::failure("Admin not found"));
    };

    let token = generate_reset_token();
    app_state
        .admins
        .set_admin_reset_token(admin.id, &token, reset_token_expiry(Utc::now()))
        .await?;

    let link = format!(
        "{}/reset-password/{}",
        app_state.config.frontend_url.trim_end_matches('/'),
        token
    );
    let first_name = if admin.first_name.is_empty() { "Admin" } else { admin.first_name.as_str() };
    app_state
        .mailer
        .send(&admin.email, "Password Reset Request", reset_password_email(first_name, &link))
        .await
        .map_err(|e| BackendError::internal(format!("reset mail to {} failed: {}", admin.email, e)))?;

    tracing::info!(admin_id = %admin.id, "Password reset link sent");
    Ok(ApiResponse::message("Password reset email sent successfully"))
}

pub async fn admin_reset_password(
    State(app_state): State<AppState>,
    AuthAdmin(auth): AuthAdmin,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    let Some(password) = request.password.as_deref().filter(|p| !p.is_empty()) else {
        return Ok(ApiResponse::failure("Password is required"));
    };

    let password_hash = hash_password(password, app_state.config.bcrypt_cost)?;
    if !app_state.admins.set_admin_password(auth.admin_id, &password_hash).await? {
        return Ok(ApiResponse::failure("Admin not found"));
    }

    tracing::info!(admin_id = %auth.admin_id, "Admin password reset");
    Ok(ApiResponse::message("Password reset successful"))
}
