/**
 * Item Library Handlers
 *
 * - POST /{id}/items - multipart `image`, optional `width`/`height`, and an
 *   optional immediate placement (`areaId`, `x`, `y`, `rotation`)
 * - POST /{id}/areas/{areaId}/items - place a library item
 * - PUT /{id}/areas/{areaId}/items/{instanceId} - move, resize or flip a placement
 * - DELETE /{id}/items/{itemId} - remove from the library and every area
 * - DELETE /{id}/areas/{areaId}/items/{instanceId} - remove one placement
 */

use axum::extract::{Multipart, Path, State};
use axum::response::Json;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::projects::handlers::types::{PlaceItemRequest, UpdateInstanceRequest};
use crate::backend::projects::handlers::{load_project, optional_number, save_project, store_image};
use crate::backend::server::state::AppState;
use crate::backend::store::ProjectScope;
use crate::backend::upload::FormData;
use crate::shared::numeric::coerce_or;
use crate::shared::ApiResponse;
use crate::staging::{ImageFields, ItemInstance, LibraryAddition, LibraryRemoval, Placement, PlacementPatch};

fn form_placement(form: &FormData) -> Result<Placement, BackendError> {
    Ok(Placement {
        x: form.number("x")?.unwrap_or(0.0),
        y: form.number("y")?.unwrap_or(0.0),
        rotation: form.number("rotation")?.unwrap_or(0.0),
        flip_x: form.flag("flipX").unwrap_or(false),
        flip_y: form.flag("flipY").unwrap_or(false),
        ..Placement::default()
    })
}

pub async fn add_item(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<ApiResponse<LibraryAddition>, BackendError> {
    let mut form = FormData::read(multipart).await?;
    let file = form
        .take_file("image")
        .ok_or_else(|| BackendError::bad_request("Image is required"))?;
    let width = form.number("width")?;
    let height = form.number("height")?;
    let placement = form_placement(&form)?;
    let area_key = form.string("areaId");

    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let stored = store_image(&app_state, file).await?;
    let addition = project.add_library_item(
        ImageFields::from_stored(&stored),
        width,
        height,
        area_key.as_deref().map(|key| (key, placement)),
    );
    save_project(&app_state, &mut project).await?;

    tracing::info!(
        project_id = %project.id,
        item_id = %addition.item.item_id,
        placed = addition.area_item.is_some(),
        "Library item added"
    );
    Ok(ApiResponse::success("Item added to library successfully", addition))
}

pub async fn place_item(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((id, area_id)): Path<(String, String)>,
    Json(request): Json<PlaceItemRequest>,
) -> Result<ApiResponse<ItemInstance>, BackendError> {
    let item_id = request
        .item_id
        .as_deref()
        .map(str::trim)
        .filter(|item_id| !item_id.is_empty())
        .ok_or_else(|| BackendError::bad_request("itemId is required"))?;
    let placement = Placement {
        x: coerce_or(request.x.as_ref(), "x", 0.0)?,
        y: coerce_or(request.y.as_ref(), "y", 0.0)?,
        rotation: coerce_or(request.rotation.as_ref(), "rotation", 0.0)?,
        width: optional_number("width", &request.width)?,
        height: optional_number("height", &request.height)?,
        flip_x: request.flip_x.unwrap_or(false),
        flip_y: request.flip_y.unwrap_or(false),
    };

    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let instance = project.place_item(&area_id, item_id, placement)?;
    save_project(&app_state, &mut project).await?;

    tracing::info!(project_id = %project.id, instance_id = %instance.instance_id, "Item placed");
    Ok(ApiResponse::success("Item added to area successfully", instance))
}

pub async fn update_item_instance(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((id, area_id, instance_id)): Path<(String, String, String)>,
    Json(request): Json<UpdateInstanceRequest>,
) -> Result<ApiResponse<ItemInstance>, BackendError> {
    let patch = PlacementPatch {
        x: optional_number("x", &request.x)?,
        y: optional_number("y", &request.y)?,
        rotation: optional_number("rotation", &request.rotation)?,
        width: optional_number("width", &request.width)?,
        height: optional_number("height", &request.height)?,
        flip_x: request.flip_x,
        flip_y: request.flip_y,
    };

    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let instance = project.update_instance(&area_id, &instance_id, patch)?;
    save_project(&app_state, &mut project).await?;

    Ok(ApiResponse::success("Item updated successfully", instance))
}

pub async fn delete_item(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<ApiResponse<LibraryRemoval>, BackendError> {
    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let removal = project.delete_library_item(&item_id);
    save_project(&app_state, &mut project).await?;

    tracing::info!(
        project_id = %project.id,
        item_id = %item_id,
        found = removal.item.is_some(),
        removed_instances = removal.removed_instances,
        "Library item deleted"
    );
    Ok(ApiResponse::success(
        "Item deleted from project and all areas successfully",
        removal,
    ))
}

pub async fn delete_item_instance(
    State(app_state): State<AppState>,
    AuthUser(auth): AuthUser,
    Path((id, area_id, instance_id)): Path<(String, String, String)>,
) -> Result<ApiResponse<ItemInstance>, BackendError> {
    let mut project = load_project(&app_state, &id, ProjectScope::Owner(auth.user_id)).await?;
    let instance = project.delete_instance(&area_id, &instance_id)?;
    save_project(&app_state, &mut project).await?;

    Ok(ApiResponse::success("Item deleted from area successfully", instance))
}
