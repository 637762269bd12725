/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including store selection, upload directory creation and route
 * configuration.
 *
 * # Initialization Process
 *
 * 1. Make sure the upload directory exists
 * 2. Connect to Postgres if `DATABASE_URL` is set, else use memory
 * 3. Choose the mailer (SMTP or log-only)
 * 4. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{build_mailer, load_database};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// Startup is resilient: a missing database or mail server is logged and the
/// server continues with the in-memory store or log-only mailer.
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing staging backend server");

    if let Err(e) = tokio::fs::create_dir_all(&config.upload_dir).await {
        tracing::error!("Failed to create upload directory {}: {}", config.upload_dir.display(), e);
    }

    let mailer = build_mailer(&config);
    let app_state = match load_database(&config).await {
        Some(store) => AppState::with_postgres(config, store),
        None => AppState::in_memory(config),
    }
    .with_mailer(mailer);

    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
