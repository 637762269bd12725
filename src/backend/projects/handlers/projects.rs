/**
 * Project Handlers
 *
 * Owner-scoped project endpoints under /api/straging:
 * - POST / - create from a multipart form, optional `images` file
 * - PUT /{id} - update descriptive fields
 * - DELETE /{id} - hard delete
 * - GET /user, GET /user/{id} - the caller's own projects
 * - GET /{id}/areas - areas with their hotspots and info markers
 */

use axum::extract::{Multipart, Path, Query, State};
use axum::response::Json;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::projects::handlers::types::ProjectsPage;
use crate::backend::projects::handlers::{
    list_page, load_project, parse_project_id, project_not_found, save_project, store_image,
};
use crate::backend::server::state::AppState;
use crate::backend::store::ProjectScope;
use crate::backend::upload::FormData;
use crate::shared::{ApiResponse, PageQuery};
use crate::staging::{AreaView, ImageSource, NewProject, Project, ProjectImage, ProjectPatch, ProjectSummary, ProjectView};

fn new_project(form: &FormData) -> NewProject {
    NewProject {
        project_name: form.string("projectName").unwrap_or_default(),
        street_address: form.string("streetAddress").unwrap_or_default(),
        apt_landmark: form.string("aptLandmark"),
        city_locality: form.string("cityLocality").unwrap_or_default(),
        state: form.string("state").unwrap_or_default(),
        country: form.string("country").unwrap_or_default(),
        note: form.string("note"),
    }
}

pub async fn create_project(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    multipart: Multipart,
) -> Result<ApiResponse<ProjectView>, BackendError> {
    let mut form = FormData::read(multipart).await?;
    let details = new_project(&form);
    details.validate()?;

    let image = match form.take_file("images") {
        Some(file) => {
            let stored = store_image(&app_state, file).await?;
            Some(ProjectImage::from_stored(&stored, ImageSource::Capture))
        }
        None => None,
    };

    let project = Project::create(details, auth.user_id, image)?;
    app_state.projects.insert_project(&project).await?;

    tracing::info!(
        project_id = %project.id,
        user_id = %auth.user_id,
        areas = project.areas.len(),
        "Staging project created"
    );
    Ok(ApiResponse::created(
        "Staging project created successfully",
        ProjectView::full(&project),
    ))
}

pub async fn update_project(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> Result<ApiResponse<ProjectView>, BackendError> {
    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    project.apply_patch(patch)?;
    save_project(&app_state, &mut project).await?;

    tracing::info!(project_id = %project.id, "Staging project updated");
    Ok(ApiResponse::success(
        "Staging project updated successfully",
        ProjectView::full(&project),
    ))
}

pub async fn delete_project(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProjectSummary>, BackendError> {
    let id = parse_project_id(&id)?;
    let project = app_state
        .projects
        .delete_project(id, ProjectScope::Owner(auth.user_id))
        .await?
        .ok_or_else(project_not_found)?;

    tracing::info!(project_id = %id, user_id = %auth.user_id, "Staging project deleted");
    Ok(ApiResponse::success(
        "Staging project deleted successfully",
        ProjectView::full(&project).project,
    ))
}

pub async fn list_own_projects(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<ApiResponse<ProjectsPage>, BackendError> {
    let page = list_page(&app_state, ProjectScope::Owner(auth.user_id), &query, ProjectView::full).await?;
    Ok(ApiResponse::success("Your staging projects retrieved successfully", page))
}

pub async fn get_own_project(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProjectView>, BackendError> {
    let project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    Ok(ApiResponse::success(
        "Staging project retrieved successfully",
        ProjectView::full(&project),
    ))
}

pub async fn get_areas(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<Vec<AreaView>>, BackendError> {
    let project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    Ok(ApiResponse::success(
        "Areas retrieved successfully",
        ProjectView::full(&project).areas,
    ))
}
