/**
 * Application State Management
 *
 * This module defines the application state shared by every handler and
 * middleware through `State<AppState>`.
 *
 * # Architecture
 *
 * `AppState` holds trait objects for every external concern:
 * - the four stores (projects, users, admins, refresh tokens), backed either
 *   by one `PgStore` or one `MemoryStore`
 * - object storage for uploaded images
 * - the Google ID token verifier and the mailer
 *
 * and the configuration plus the `TokenService` built from it. Everything is
 * behind `Arc`; the state is cloned into every request.
 */

use std::sync::Arc;

use crate::backend::auth::google::{GoogleTokenVerifier, IdentityVerifier};
use crate::backend::auth::mailer::{LogMailer, Mailer};
use crate::backend::auth::sessions::TokenService;
use crate::backend::store::{
    AdminStore, MemoryStore, PgStore, ProjectStore, RefreshTokenStore, UserStore,
};
use crate::backend::upload::{DiskStorage, ObjectStorage};
use crate::shared::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub projects: Arc<dyn ProjectStore>,
    pub users: Arc<dyn UserStore>,
    pub admins: Arc<dyn AdminStore>,
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    pub storage: Arc<dyn ObjectStorage>,
    pub tokens: TokenService,
    pub identity: Arc<dyn IdentityVerifier>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// State backed by in-memory stores, local disk storage, the Google
    /// verifier and a log-only mailer
    pub fn in_memory(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::with_stores(config, store.clone(), store.clone(), store.clone(), store)
    }

    /// State backed by Postgres
    pub fn with_postgres(config: AppConfig, store: PgStore) -> Self {
        let store = Arc::new(store);
        Self::with_stores(config, store.clone(), store.clone(), store.clone(), store)
    }

    fn with_stores(
        config: AppConfig,
        projects: Arc<dyn ProjectStore>,
        users: Arc<dyn UserStore>,
        admins: Arc<dyn AdminStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
    ) -> Self {
        let storage = DiskStorage::new(
            config.upload_dir.clone(),
            config.public_base_url.clone(),
            config.max_upload_bytes,
        );
        Self {
            tokens: TokenService::new(&config),
            identity: Arc::new(GoogleTokenVerifier::new(config.google_client_id.clone())),
            storage: Arc::new(storage),
            mailer: Arc::new(LogMailer),
            config: Arc::new(config),
            projects,
            users,
            admins,
            refresh_tokens,
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentityVerifier>) -> Self {
        self.identity = identity;
        self
    }
}
