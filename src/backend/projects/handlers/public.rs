/**
 * Public Project Handlers
 *
 * Anonymous reads under /api/straging/public. The owner id is left out of
 * every project returned here.
 */

use axum::extract::{Path, Query, State};

use crate::backend::error::BackendError;
use crate::backend::projects::handlers::types::ProjectsPage;
use crate::backend::projects::handlers::{list_page, load_project};
use crate::backend::server::state::AppState;
use crate::backend::store::ProjectScope;
use crate::shared::{ApiResponse, PageQuery};
use crate::staging::ProjectView;

pub async fn public_list_projects(
    State(app_state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<ProjectsPage>, BackendError> {
    let page = list_page(&app_state, ProjectScope::All, &query, ProjectView::public).await?;
    Ok(ApiResponse::success("Public staging projects retrieved successfully", page))
}

pub async fn public_get_project(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProjectView>, BackendError> {
    let project = load_project(&app_state, &id, ProjectScope::All).await?;
    Ok(ApiResponse::success(
        "Staging project details retrieved successfully",
        ProjectView::public(&project),
    ))
}
