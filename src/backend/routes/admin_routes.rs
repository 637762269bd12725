/**
 * Admin Account Routes
 *
 * ## Public
 * - `POST /api/admin/login`, `POST /api/admin/create`
 * - `POST /api/admin/forgot-password`
 *
 * ## Admin token
 * - `GET /api/admin/profile`, `PUT /api/admin/update`
 * - `POST /api/admin/reset-password`
 */

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;

use crate::backend::admin::handlers::{
    admin_forgot_password, admin_login, admin_profile, admin_reset_password, create_admin, update_admin,
};
use crate::backend::middleware::auth::admin_middleware;
use crate::backend::server::state::AppState;

pub fn configure_admin_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/create", post(create_admin))
        .route("/api/admin/forgot-password", post(admin_forgot_password));

    let admin = Router::new()
        .route("/api/admin/profile", get(admin_profile))
        .route("/api/admin/update", put(update_admin))
        .route("/api/admin/reset-password", post(admin_reset_password))
        .route_layer(from_fn_with_state(app_state.clone(), admin_middleware));

    router.merge(public).merge(admin)
}
