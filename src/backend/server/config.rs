/**
 * Server Configuration
 *
 * This module turns `AppConfig` into the optional services the server runs
 * with: the Postgres store and the SMTP mailer.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * A database that cannot be reached or migrated leaves the server on the
 * in-memory stores; an SMTP setup that fails to build leaves it on the
 * log-only mailer.
 */

use std::sync::Arc;

use crate::backend::auth::mailer::{LogMailer, Mailer, SmtpMailer};
use crate::backend::store::PgStore;
use crate::shared::AppConfig;

/// Connect to Postgres and run migrations.
///
/// Returns `None` when `DATABASE_URL` is unset or the connection fails.
pub async fn load_database(config: &AppConfig) -> Option<PgStore> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using in-memory stores; data is lost on restart.");
        return None;
    };

    tracing::info!("Connecting to database...");
    match PgStore::connect(database_url).await {
        Ok(store) => {
            tracing::info!("Database connected and migrations applied");
            Some(store)
        }
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            tracing::warn!("Falling back to in-memory stores");
            None
        }
    }
}

/// SMTP mailer when configured, otherwise a mailer that only logs
pub fn build_mailer(config: &AppConfig) -> Arc<dyn Mailer> {
    let Some(smtp) = &config.smtp else {
        tracing::info!("SMTP not configured. Outgoing mail will be logged only.");
        return Arc::new(LogMailer);
    };

    match SmtpMailer::new(smtp) {
        Ok(mailer) => {
            tracing::info!(host = %smtp.host, "SMTP mailer configured");
            Arc::new(mailer)
        }
        Err(e) => {
            tracing::error!("Failed to configure SMTP mailer: {}", e);
            Arc::new(LogMailer)
        }
    }
}
