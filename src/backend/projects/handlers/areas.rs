/**
 * Area Handlers
 *
 * - POST /{id}/areas - multipart `areaName` + `image`
 * - DELETE /{id}/areas/{areaId}
 * - POST /{id}/areas/{areaId}/info - JSON `description`, `x`, `y`
 * - POST /{id}/areas/{areaId}/hotspots - multipart `title`, `x`, `y`, `image`
 * - DELETE /{id}/delete-area-hotspot - JSON `areaId` and/or `hotspotId`
 *
 * `{areaId}` may be an area's `areaId`, its `_id` or its `id` alias.
 */

use axum::extract::{Multipart, Path, State};
use axum::response::Json;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::projects::handlers::types::{AreaHotspotDeleteRequest, InfoRequest};
use crate::backend::projects::handlers::{load_project, save_project, store_image};
use crate::backend::server::state::AppState;
use crate::backend::store::ProjectScope;
use crate::backend::upload::FormData;
use crate::shared::numeric::coerce_or;
use crate::shared::ApiResponse;
use crate::staging::{Area, HotspotInput, HotspotPlacement, ImageFields, InfoInput, InfoUpsert, PairDeletion};

pub async fn add_area(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<ApiResponse<Area>, BackendError> {
    let mut form = FormData::read(multipart).await?;
    let area_name = form
        .string("areaName")
        .ok_or_else(|| BackendError::bad_request("Area name is required"))?;
    let file = form
        .take_file("image")
        .ok_or_else(|| BackendError::bad_request("Image is required for area"))?;

    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let stored = store_image(&app_state, file).await?;
    let area = project.add_area(&area_name, ImageFields::from_stored(&stored))?;
    save_project(&app_state, &mut project).await?;

    tracing::info!(project_id = %project.id, area_id = %area.area_id, areas = project.areas.len(), "Area added");
    Ok(ApiResponse::success("Area added successfully", area))
}

pub async fn delete_area(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((id, area_id)): Path<(String, String)>,
) -> Result<ApiResponse<Area>, BackendError> {
    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let area = project.delete_area(&area_id)?;
    save_project(&app_state, &mut project).await?;

    tracing::info!(project_id = %project.id, area_id = %area.area_id, "Area deleted");
    Ok(ApiResponse::success("Area deleted successfully", area))
}

pub async fn add_info(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((id, area_id)): Path<(String, String)>,
    Json(request): Json<InfoRequest>,
) -> Result<ApiResponse<InfoUpsert>, BackendError> {
    let description = request
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| BackendError::bad_request("Description is required"))?;
    let input = InfoInput {
        description: description.to_string(),
        x: coerce_or(request.x.as_ref(), "x", 0.0)?,
        y: coerce_or(request.y.as_ref(), "y", 0.0)?,
    };

    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let upsert = project.upsert_info(&area_id, input)?;
    save_project(&app_state, &mut project).await?;

    let message = if upsert.created {
        "Info added successfully"
    } else {
        "Info updated successfully"
    };
    Ok(ApiResponse::success(message, upsert))
}

pub async fn add_hotspot(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((id, area_id)): Path<(String, String)>,
    multipart: Multipart,
) -> Result<ApiResponse<HotspotPlacement>, BackendError> {
    let mut form = FormData::read(multipart).await?;
    let (Some(title), Some(x), Some(y)) = (form.string("title"), form.number("x")?, form.number("y")?) else {
        return Err(BackendError::bad_request("x, y and title are required"));
    };
    let file = form
        .take_file("image")
        .ok_or_else(|| BackendError::bad_request("Image is required for hotspot"))?;

    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    if project.resolve_area(&area_id).is_none() {
        return Err(BackendError::not_found("Parent area not found"));
    }
    let stored = store_image(&app_state, file).await?;
    let placement = project.add_hotspot(&area_id, HotspotInput { title, x, y }, ImageFields::from_stored(&stored))?;
    save_project(&app_state, &mut project).await?;

    tracing::info!(
        project_id = %project.id,
        hotspot_id = %placement.hotspot.hotspot_id,
        child_area_id = %placement.area.area_id,
        hotspot_created = placement.hotspot_created,
        area_created = placement.area_created,
        "Hotspot stored"
    );
    let message = if placement.hotspot_created {
        "Hotspot added successfully"
    } else {
        "Hotspot updated successfully"
    };
    Ok(ApiResponse::success(message, placement))
}

pub async fn delete_area_hotspot(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    Json(request): Json<AreaHotspotDeleteRequest>,
) -> Result<ApiResponse<PairDeletion>, BackendError> {
    if request.area_id.is_none() && request.hotspot_id.is_none() {
        return Err(BackendError::bad_request("Either areaId or hotspotId is required"));
    }

    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let deleted = project.delete_area_and_hotspot(request.area_id.as_deref(), request.hotspot_id.as_deref())?;
    save_project(&app_state, &mut project).await?;

    tracing::info!(
        project_id = %project.id,
        areas = deleted.deleted_areas.len(),
        hotspots = deleted.deleted_hotspots.len(),
        "Area and hotspot deleted"
    );
    Ok(ApiResponse::success("Area and hotspot deleted successfully", deleted))
}
