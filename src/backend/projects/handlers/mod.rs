//! Staging Project Handlers
//!
//! Every mutating handler follows the same read-modify-write cycle through
//! [`load_project`] and [`save_project`]. A project owned by someone else is
//! reported exactly like a missing one.

pub mod admin;
pub mod areas;
pub mod items;
pub mod projects;
pub mod public;
pub mod types;

pub use admin::{admin_bulk_delete_projects, admin_delete_project, admin_get_project, admin_list_projects};
pub use areas::{add_area, add_hotspot, add_info, delete_area, delete_area_hotspot};
pub use items::{add_item, delete_item, delete_item_instance, place_item, update_item_instance};
pub use projects::{create_project, delete_project, get_areas, get_own_project, list_own_projects, update_project};
pub use public::{public_get_project, public_list_projects};

use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::projects::handlers::types::ProjectsPage;
use crate::backend::server::state::AppState;
use crate::backend::store::ProjectScope;
use crate::backend::upload::UploadedFile;
use crate::shared::numeric::NumericInput;
use crate::shared::{Page, PageQuery, SharedError};
use crate::staging::{Project, ProjectView, StoredImage};

/// A missing project and one owned by someone else look the same
pub(crate) fn project_not_found() -> BackendError {
    SharedError::not_found("Staging project").into()
}

pub(crate) fn parse_project_id(id: &str) -> Result<Uuid, BackendError> {
    Uuid::parse_str(id.trim()).map_err(|_| BackendError::bad_request("Invalid project ID"))
}

pub(crate) async fn load_project(
    app_state: &AppState,
    id: &str,
    scope: ProjectScope,
) -> Result<Project, BackendError> {
    let id = parse_project_id(id)?;
    app_state
        .projects
        .find_project(id, scope)
        .await?
        .ok_or_else(project_not_found)
}

/// Stamp `updatedAt` and write the whole document back
pub(crate) async fn save_project(app_state: &AppState, project: &mut Project) -> Result<(), BackendError> {
    project.touch();
    if !app_state.projects.save_project(project).await? {
        // deleted between load and save
        return Err(project_not_found());
    }
    Ok(())
}

pub(crate) async fn store_image(app_state: &AppState, file: UploadedFile) -> Result<StoredImage, BackendError> {
    let stored = app_state.storage.store(file).await?;
    tracing::debug!(url = %stored.url, size = stored.size, "Image stored");
    Ok(stored)
}

pub(crate) async fn list_page(
    app_state: &AppState,
    scope: ProjectScope,
    query: &PageQuery,
    view: fn(&Project) -> ProjectView,
) -> Result<ProjectsPage, BackendError> {
    let page: Page<Project> = app_state.projects.list_projects(scope, query).await?;
    let page = page.map(|project| view(&project));
    Ok(ProjectsPage {
        projects: page.items,
        pagination: page.pagination,
    })
}

/// Optional number from a JSON body
pub(crate) fn optional_number(field: &str, value: &Option<NumericInput>) -> Result<Option<f64>, SharedError> {
    value.as_ref().map(|value| value.to_f64(field)).transpose()
}
