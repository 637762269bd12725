//! Persistence
//!
//! Every collection is reached through an async trait so handlers never see
//! the backing database. Two implementations exist:
//!
//! - [`PgStore`] keeps each project as one row with its embedded collections
//!   in JSONB columns, and users, admins and refresh tokens in plain tables
//! - [`MemoryStore`] keeps everything in `RwLock<HashMap>`s; it is selected
//!   when no `DATABASE_URL` is configured and by the integration tests
//!
//! A project is always read, changed in memory by the staging core, and
//! written back whole with [`ProjectStore::save`].

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::admin::accounts::{Admin, AdminUpdate, NewAdmin};
use crate::backend::auth::users::{NewUser, ProfileUpdate, User, UserListQuery};
use crate::shared::{Page, PageQuery};
use crate::staging::Project;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A unique field is already taken
    #[error("{0} already exists")]
    Conflict(&'static str),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Which projects a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    /// Only projects created by this user
    Owner(Uuid),
    /// Every project
    All,
}

impl ProjectScope {
    pub fn permits(&self, project: &Project) -> bool {
        match self {
            Self::Owner(owner) => project.created_by == *owner,
            Self::All => true,
        }
    }

    fn owner(&self) -> Option<Uuid> {
        match self {
            Self::Owner(owner) => Some(*owner),
            Self::All => None,
        }
    }
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn insert_project(&self, project: &Project) -> Result<(), StoreError>;

    async fn find_project(&self, id: Uuid, scope: ProjectScope) -> Result<Option<Project>, StoreError>;

    /// Overwrite a stored project; returns false if it no longer exists
    async fn save_project(&self, project: &Project) -> Result<bool, StoreError>;

    async fn delete_project(&self, id: Uuid, scope: ProjectScope) -> Result<Option<Project>, StoreError>;

    /// Delete by id, returning how many existed
    async fn delete_projects(&self, ids: &[Uuid]) -> Result<u64, StoreError>;

    /// Newest first, optionally filtered by a case-insensitive name search
    async fn list_projects(&self, scope: ProjectScope, query: &PageQuery) -> Result<Page<Project>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] if the email is taken
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Includes soft-deleted users
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_google_uid(&self, uid: &str) -> Result<Option<User>, StoreError>;

    async fn update_user(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>, StoreError>;

    /// Attach a Google account to an existing user
    async fn link_google(&self, id: Uuid, uid: &str, email_verified: bool) -> Result<Option<User>, StoreError>;

    /// Soft delete (`true`) or restore (`false`)
    async fn set_user_deleted(&self, id: Uuid, deleted: bool) -> Result<Option<User>, StoreError>;

    async fn purge_user(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn purge_users(&self, ids: &[Uuid]) -> Result<u64, StoreError>;

    async fn list_users(&self, query: &UserListQuery) -> Result<Page<User>, StoreError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Fails with [`StoreError::Conflict`] if the email is taken
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, StoreError>;

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, StoreError>;

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError>;

    async fn update_admin(&self, id: Uuid, update: &AdminUpdate) -> Result<Option<Admin>, StoreError>;

    /// Replace the password hash and clear any reset token
    async fn set_admin_password(&self, id: Uuid, password_hash: &str) -> Result<bool, StoreError>;

    async fn set_admin_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<bool, StoreError>;
}

/// One live refresh token per user
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn put_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<(), StoreError>;

    /// The stored token, if present and unexpired
    async fn refresh_token(&self, user_id: Uuid) -> Result<Option<String>, StoreError>;

    async fn revoke_refresh_token(&self, user_id: Uuid) -> Result<(), StoreError>;
}

/// Escape `%`, `_` and `\` for use inside an `ILIKE` pattern
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("loft"), "%loft%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
