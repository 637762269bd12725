/**
 * Staging Project Routes
 *
 * Mounted under `/api/straging`, the prefix existing clients call, and
 * again under `/api/staging`. Paths below are relative to either prefix.
 *
 * ## Public
 * - `GET /public`, `GET /public/{id}`
 *
 * ## Admin token
 * - `GET /admin/all`, `GET|DELETE /admin/{id}`
 * - `DELETE /admin/bulk`
 *
 * ## User token (owner scoped)
 * - `POST /` (multipart), `PUT|DELETE /{id}`
 * - `GET /user`, `GET /user/{id}`
 * - `GET|POST /{id}/areas`, `DELETE /{id}/areas/{areaId}`
 * - `POST /{id}/areas/{areaId}/info`
 * - `POST /{id}/areas/{areaId}/hotspots`
 * - `DELETE /{id}/delete-area-hotspot`
 * - `POST /{id}/items`, `DELETE /{id}/items/{itemId}`
 * - `POST /{id}/areas/{areaId}/items`
 * - `PUT|DELETE /{id}/areas/{areaId}/items/{instanceId}`
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::backend::middleware::auth::{admin_middleware, auth_middleware};
use crate::backend::projects::handlers::{
    add_area, add_hotspot, add_info, add_item, admin_bulk_delete_projects, admin_delete_project,
    admin_get_project, admin_list_projects, create_project, delete_area, delete_area_hotspot,
    delete_item, delete_item_instance, delete_project, get_areas, get_own_project, list_own_projects,
    place_item, public_get_project, public_list_projects, update_item_instance, update_project,
};
use crate::backend::server::state::AppState;

/// Prefix of the deployed service
pub const PROJECTS_PREFIX: &str = "/api/straging";

/// Correctly spelled alias serving the same routes
pub const PROJECTS_ALIAS: &str = "/api/staging";

pub fn configure_staging_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    [PROJECTS_PREFIX, PROJECTS_ALIAS]
        .into_iter()
        .fold(router, |router, prefix| router.merge(project_routes(prefix, app_state)))
}

fn project_routes(prefix: &str, app_state: &AppState) -> Router<AppState> {
    let path = |rest: &str| format!("{}{}", prefix, rest);

    let public = Router::new()
        .route(&path("/public"), get(public_list_projects))
        .route(&path("/public/{id}"), get(public_get_project));

    let admin = Router::new()
        .route(&path("/admin/all"), get(admin_list_projects))
        .route(&path("/admin/bulk"), delete(admin_bulk_delete_projects))
        .route(
            &path("/admin/{id}"),
            get(admin_get_project).delete(admin_delete_project),
        )
        .route_layer(from_fn_with_state(app_state.clone(), admin_middleware));

    let owner = Router::new()
        .route(prefix, post(create_project))
        .route(&path("/user"), get(list_own_projects))
        .route(&path("/user/{id}"), get(get_own_project))
        .route(&path("/{id}"), put(update_project).delete(delete_project))
        .route(&path("/{id}/areas"), get(get_areas).post(add_area))
        .route(&path("/{id}/areas/{area_id}"), delete(delete_area))
        .route(&path("/{id}/areas/{area_id}/info"), post(add_info))
        .route(&path("/{id}/areas/{area_id}/hotspots"), post(add_hotspot))
        .route(&path("/{id}/delete-area-hotspot"), delete(delete_area_hotspot))
        .route(&path("/{id}/items"), post(add_item))
        .route(&path("/{id}/items/{item_id}"), delete(delete_item))
        .route(&path("/{id}/areas/{area_id}/items"), post(place_item))
        .route(
            &path("/{id}/areas/{area_id}/items/{instance_id}"),
            put(update_item_instance).delete(delete_item_instance),
        )
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    public.merge(admin).merge(owner)
}
