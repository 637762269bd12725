/**
 * User Administration Handlers
 *
 * Admin-only endpoints under /api/users/admin:
 * - GET /all, GET /deleted - paginated listings with search and sorting
 * - GET /{id} - one user (HTTP 200 `status: 0` when absent)
 * - DELETE /{id} - soft delete
 * - POST /{id}/restore - undo a soft delete
 * - DELETE /{id}/permanent - hard delete
 * - DELETE /bulk-delete - hard delete many
 */

use axum::extract::{Path, Query, State};
use axum::response::Json;
use uuid::Uuid;

use crate::backend::auth::handlers::types::{BulkDeleteRequest, BulkDeleteResponse, UserListParams, UsersPage};
use crate::backend::auth::users::{UserListQuery, UserResponse};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthAdmin;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

fn parse_user_id(id: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(id.trim()).map_err(|_| BackendError::bad_request("Invalid user ID"))
}

async fn list(app_state: &AppState, params: UserListParams, deleted: bool) -> Result<UsersPage, BackendError> {
    let query = UserListQuery {
        page: params.page_query(),
        deleted,
        sort: params.sort_by.unwrap_or_default(),
        order: params.sort_order.unwrap_or_default(),
    };
    let page = app_state.users.list_users(&query).await?.map(|user| UserResponse::from(&user));
    Ok(UsersPage {
        users: page.items,
        pagination: page.pagination,
    })
}

pub async fn list_users(
    State(app_state): State<AppState>,
    AuthAdmin(_admin): AuthAdmin,
    Query(params): Query<UserListParams>,
) -> Result<ApiResponse<UsersPage>, BackendError> {
    let page = list(&app_state, params, false).await?;
    Ok(ApiResponse::success("Users fetched successfully", page))
}

pub async fn list_deleted_users(
    State(app_state): State<AppState>,
    AuthAdmin(_admin): AuthAdmin,
    Query(params): Query<UserListParams>,
) -> Result<ApiResponse<UsersPage>, BackendError> {
    let page = list(&app_state, params, true).await?;
    Ok(ApiResponse::success("Deleted users fetched successfully", page))
}

pub async fn get_user(
    State(app_state): State<AppState>,
    AuthAdmin(_admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserResponse>, BackendError> {
    let id = parse_user_id(&id)?;
    Ok(match app_state.users.find_user(id).await? {
        Some(user) => ApiResponse::success("User fetched successfully", UserResponse::from(&user)),
        None => ApiResponse::failure("User not found"),
    })
}

pub async fn delete_user(
    State(app_state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserResponse>, BackendError> {
    let id = parse_user_id(&id)?;
    let user = app_state
        .users
        .set_user_deleted(id, true)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    app_state.refresh_tokens.revoke_refresh_token(id).await?;

    tracing::info!(user_id = %id, admin_id = %admin.admin_id, "User soft-deleted by admin");
    Ok(ApiResponse::success("User deleted successfully", UserResponse::from(&user)))
}

pub async fn restore_user(
    State(app_state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserResponse>, BackendError> {
    let id = parse_user_id(&id)?;
    let existing = app_state
        .users
        .find_user(id)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    if !existing.is_deleted {
        return Err(BackendError::bad_request("User is not deleted"));
    }

    let user = app_state
        .users
        .set_user_deleted(id, false)
        .await?
        .ok_or_else(|| BackendError::not_found("User not found"))?;

    tracing::info!(user_id = %id, admin_id = %admin.admin_id, "User restored");
    Ok(ApiResponse::success("User restored successfully", UserResponse::from(&user)))
}

pub async fn purge_user(
    State(app_state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, BackendError> {
    let id = parse_user_id(&id)?;
    if !app_state.users.purge_user(id).await? {
        return Err(BackendError::not_found("User not found"));
    }

    tracing::info!(user_id = %id, admin_id = %admin.admin_id, "User permanently deleted");
    Ok(ApiResponse::message("User permanently deleted"))
}

pub async fn bulk_delete_users(
    State(app_state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<ApiResponse<BulkDeleteResponse>, BackendError> {
    if request.ids.is_empty() {
        return Err(BackendError::bad_request("ids must be a non-empty array"));
    }
    let ids = request
        .ids
        .iter()
        .map(|id| parse_user_id(id))
        .collect::<Result<Vec<_>, _>>()?;

    let deleted_count = app_state.users.purge_users(&ids).await?;
    tracing::info!(admin_id = %admin.admin_id, requested = ids.len(), deleted_count, "Bulk user delete");
    Ok(ApiResponse::success(
        "Users deleted successfully",
        BulkDeleteResponse { deleted_count },
    ))
}
