/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * Applied to every route, outermost first:
 * 1. `TraceLayer` - one span per request
 * 2. `CorsLayer::permissive` - the admin panel and the app are served from
 *    other origins
 * 3. `DefaultBodyLimit` - uploads up to the configured image size plus form
 *    overhead
 *
 * # Static Files
 *
 * Stored images are served from the upload directory under `/uploads`.
 */

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::routes::admin_routes::configure_admin_routes;
use crate::backend::routes::staging_routes::configure_staging_routes;
use crate::backend::routes::user_routes::configure_user_routes;
use crate::backend::server::state::AppState;

/// Room for the text fields sent next to an image
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "statusCode": 404, "message": "Route not found" })),
    )
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", get(health));

    let router = configure_user_routes(router, &app_state);
    let router = configure_admin_routes(router, &app_state);
    let router = configure_staging_routes(router, &app_state);

    let router = router.nest_service("/uploads", ServeDir::new(&app_state.config.upload_dir));

    let body_limit = app_state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;
    router
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(app_state)
}
