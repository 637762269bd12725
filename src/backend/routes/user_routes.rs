/**
 * User Routes
 *
 * ## Public
 * - `POST /api/users/register`, `POST /api/users/login`
 * - `POST /api/users/google-signin`
 * - `POST /api/users/forgot-password`, `POST /api/users/refresh`
 *
 * ## User token
 * - `GET /api/users/profile`, `PUT /api/users/update`, `DELETE /api/users/delete`
 *
 * ## Admin token
 * - `GET /api/users/admin/all`, `GET /api/users/admin/deleted`
 * - `GET|DELETE /api/users/admin/{id}`, `POST /api/users/admin/{id}/restore`
 * - `DELETE /api/users/admin/{id}/permanent`, `DELETE /api/users/admin/bulk-delete`
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::backend::auth::handlers::{
    bulk_delete_users, delete_account, delete_user, forgot_password, get_profile, get_user,
    google_signin, list_deleted_users, list_users, login, purge_user, refresh, register,
    restore_user, update_profile,
};
use crate::backend::middleware::auth::{admin_middleware, auth_middleware};
use crate::backend::server::state::AppState;

pub fn configure_user_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/google-signin", post(google_signin))
        .route("/api/users/forgot-password", post(forgot_password))
        .route("/api/users/refresh", post(refresh));

    let signed_in = Router::new()
        .route("/api/users/profile", get(get_profile))
        .route("/api/users/update", put(update_profile))
        .route("/api/users/delete", delete(delete_account))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let admin = Router::new()
        .route("/api/users/admin/all", get(list_users))
        .route("/api/users/admin/deleted", get(list_deleted_users))
        .route("/api/users/admin/bulk-delete", delete(bulk_delete_users))
        .route("/api/users/admin/{id}", get(get_user).delete(delete_user))
        .route("/api/users/admin/{id}/restore", post(restore_user))
        .route("/api/users/admin/{id}/permanent", delete(purge_user))
        .route_layer(from_fn_with_state(app_state.clone(), admin_middleware));

    router.merge(public).merge(signed_in).merge(admin)
}
