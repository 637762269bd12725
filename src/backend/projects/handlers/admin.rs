/**
 * Admin Project Handlers
 *
 * Admin-token endpoints under /api/straging/admin. Admins see every project
 * regardless of owner.
 */

use axum::extract::{Path, Query, State};
use axum::response::Json;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthAdmin;
use crate::backend::projects::handlers::types::{ProjectIdsRequest, ProjectsDeleted, ProjectsPage};
use crate::backend::projects::handlers::{list_page, load_project, parse_project_id, project_not_found};
use crate::backend::server::state::AppState;
use crate::backend::store::ProjectScope;
use crate::shared::{ApiResponse, PageQuery};
use crate::staging::{ProjectSummary, ProjectView};

pub async fn admin_list_projects(
    State(app_state): State<AppState>,
    AuthAdmin(_admin): AuthAdmin,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<ProjectsPage>, BackendError> {
    let page = list_page(&app_state, ProjectScope::All, &query, ProjectView::full).await?;
    Ok(ApiResponse::success("Staging projects retrieved successfully", page))
}

pub async fn admin_get_project(
    State(app_state): State<AppState>,
    AuthAdmin(_admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProjectView>, BackendError> {
    let project = load_project(&app_state, &id, ProjectScope::All).await?;
    Ok(ApiResponse::success(
        "Staging project retrieved successfully",
        ProjectView::full(&project),
    ))
}

pub async fn admin_delete_project(
    State(app_state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProjectSummary>, BackendError> {
    let id = parse_project_id(&id)?;
    let project = app_state
        .projects
        .delete_project(id, ProjectScope::All)
        .await?
        .ok_or_else(project_not_found)?;

    tracing::info!(project_id = %id, admin_id = %admin.admin_id, "Staging project deleted by admin");
    Ok(ApiResponse::success(
        "Staging project deleted successfully",
        ProjectView::full(&project).project,
    ))
}

pub async fn admin_bulk_delete_projects(
    State(app_state): State<AppState>,
    AuthAdmin(admin): AuthAdmin,
    Json(request): Json<ProjectIdsRequest>,
) -> Result<ApiResponse<ProjectsDeleted>, BackendError> {
    if request.ids.is_empty() {
        return Err(BackendError::bad_request("Invalid IDs provided"));
    }
    let ids = request
        .ids
        .iter()
        .map(|id| parse_project_id(id).map_err(|_| BackendError::bad_request("Invalid IDs provided")))
        .collect::<Result<Vec<_>, _>>()?;

    let deleted_count = app_state.projects.delete_projects(&ids).await?;
    tracing::info!(admin_id = %admin.admin_id, requested = ids.len(), deleted_count, "Bulk project delete");
    Ok(ApiResponse::success(
        "Staging projects deleted successfully",
        ProjectsDeleted { deleted_count },
    ))
}
