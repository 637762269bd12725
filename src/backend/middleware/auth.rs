/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require a user
 * or an admin session. It extracts and verifies the bearer token from the
 * Authorization header and makes the caller available to handlers through
 * the `AuthUser` and `AuthAdmin` extractors.
 *
 * # Silent Renewal
 *
 * When a user's access token has expired and the request carries a valid
 * refresh token in `x-refresh-token` (matching the one stored for that
 * user), the request proceeds and a new short-lived access token is returned
 * in the `x-new-access-token` response header.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::{Claims, Role, TokenError};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
pub const NEW_ACCESS_TOKEN_HEADER: &str = "x-new-access-token";

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Clone, Debug)]
pub struct AuthenticatedAdmin {
    pub admin_id: Uuid,
    pub email: String,
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, BackendError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Access token is required")
        })?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Invalid Authorization header format");
            BackendError::unauthorized("Invalid token")
        })
}

/// Exchange a refresh token for a new access token.
///
/// The token must verify against the refresh secret and equal the one
/// currently stored for its user.
pub async fn renew_access(app_state: &AppState, refresh_token: &str) -> Result<(Claims, String), BackendError> {
    let claims = app_state.tokens.verify_refresh(refresh_token).map_err(|e| {
        tracing::warn!("Invalid refresh token: {}", e);
        BackendError::unauthorized("Invalid refresh token")
    })?;
    let user_id = claims.subject()?;

    let stored = app_state.refresh_tokens.refresh_token(user_id).await?;
    if stored.as_deref() != Some(refresh_token) {
        tracing::warn!(%user_id, "Refresh token does not match stored token");
        return Err(BackendError::unauthorized("Invalid refresh token"));
    }

    let access_token = app_state.tokens.issue_refreshed_access(user_id, &claims.email)?;
    Ok((claims, access_token))
}

pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;

    let (claims, renewed) = match app_state.tokens.verify_access(token) {
        Ok(claims) => (claims, None),
        Err(TokenError::Expired) => {
            let refresh_token = request
                .headers()
                .get(REFRESH_TOKEN_HEADER)
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| BackendError::unauthorized("Token expired"))?
                .to_string();
            let (claims, access_token) = renew_access(&app_state, &refresh_token).await?;
            tracing::debug!(user = %claims.sub, "Access token renewed from refresh token");
            (claims, Some(access_token))
        }
        Err(e) => {
            tracing::warn!("Invalid token: {}", e);
            return Err(BackendError::unauthorized("Invalid token"));
        }
    };

    if claims.role != Role::User {
        return Err(BackendError::unauthorized("Invalid token"));
    }
    let user_id = claims.subject()?;

    let user = app_state
        .users
        .find_user(user_id)
        .await?
        .filter(|user| !user.is_deleted)
        .ok_or_else(|| {
            tracing::warn!(%user_id, "Token for missing or deleted user");
            BackendError::unauthorized("User not found")
        })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: user.email,
    });

    let mut response = next.run(request).await;
    if let Some(value) = renewed.and_then(|token| HeaderValue::from_str(&token).ok()) {
        response.headers_mut().insert(NEW_ACCESS_TOKEN_HEADER, value);
    }
    Ok(response)
}

pub async fn admin_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = bearer_token(request.headers())?;

    let claims = app_state.tokens.verify_access(token).map_err(|e| {
        tracing::warn!("Invalid admin token: {}", e);
        BackendError::unauthorized("Invalid token")
    })?;
    if claims.role != Role::Admin {
        return Err(BackendError::unauthorized("Admin access required"));
    }
    let admin_id = claims.subject()?;

    let admin = app_state.admins.find_admin(admin_id).await?.ok_or_else(|| {
        tracing::warn!(%admin_id, "Token for missing admin");
        BackendError::unauthorized("Admin not found")
    })?;

    request.extensions_mut().insert(AuthenticatedAdmin {
        admin_id,
        email: admin.email,
    });

    Ok(next.run(request).await)
}

#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Access token is required")
            })?;

        Ok(AuthUser(user))
    }
}

#[derive(Clone, Debug)]
pub struct AuthAdmin(pub AuthenticatedAdmin);

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let admin = parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedAdmin not found in request extensions");
                BackendError::unauthorized("Access token is required")
            })?;

        Ok(AuthAdmin(admin))
    }
}
