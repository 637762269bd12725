//! In-memory store
//!
//! Backs every store trait with a `tokio::sync::RwLock<HashMap>`. Data is lost
//! on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::admin::accounts::{Admin, AdminUpdate, NewAdmin};
use crate::backend::auth::users::{NewUser, ProfileUpdate, SortOrder, User, UserListQuery, UserSort};
use crate::backend::store::{
    AdminStore, ProjectScope, ProjectStore, RefreshTokenStore, StoreError, UserStore,
};
use crate::shared::{Page, PageQuery};
use crate::staging::Project;

#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: RwLock<HashMap<Uuid, Project>>,
    users: RwLock<HashMap<Uuid, User>>,
    admins: RwLock<HashMap<Uuid, Admin>>,
    refresh_tokens: RwLock<HashMap<Uuid, (String, DateTime<Utc>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T>(mut rows: Vec<T>, query: &PageQuery) -> Page<T> {
    let total = rows.len() as u64;
    let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX).min(rows.len());
    let end = offset.saturating_add(query.limit() as usize).min(rows.len());
    let items = rows.drain(offset..end).collect();
    Page::new(items, query, total)
}

fn contains_ci(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| value.to_lowercase().contains(needle))
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn insert_project(&self, project: &Project) -> Result<(), StoreError> {
        self.projects.write().await.insert(project.id, project.clone());
        Ok(())
    }

    async fn find_project(&self, id: Uuid, scope: ProjectScope) -> Result<Option<Project>, StoreError> {
        let projects = self.projects.read().await;
        Ok(projects.get(&id).filter(|p| scope.permits(p)).cloned())
    }

    async fn save_project(&self, project: &Project) -> Result<bool, StoreError> {
        let mut projects = self.projects.write().await;
        match projects.get_mut(&project.id) {
            Some(stored) => {
                *stored = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_project(&self, id: Uuid, scope: ProjectScope) -> Result<Option<Project>, StoreError> {
        let mut projects = self.projects.write().await;
        if !projects.get(&id).is_some_and(|p| scope.permits(p)) {
            return Ok(None);
        }
        Ok(projects.remove(&id))
    }

    async fn delete_projects(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        let mut projects = self.projects.write().await;
        Ok(ids.iter().filter(|id| projects.remove(*id).is_some()).count() as u64)
    }

    async fn list_projects(&self, scope: ProjectScope, query: &PageQuery) -> Result<Page<Project>, StoreError> {
        let search = query.search().map(str::to_lowercase);
        let mut rows: Vec<Project> = self
            .projects
            .read()
            .await
            .values()
            .filter(|p| scope.permits(p))
            .filter(|p| {
                search
                    .as_deref()
                    .is_none_or(|term| p.project_name.to_lowercase().contains(term))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(paginate(rows, query))
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict("email"));
        }
        let user = user.into_user();
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_google_uid(&self, uid: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.google_uid.as_deref() == Some(uid))
            .cloned())
    }

    async fn update_user(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &update.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(StoreError::Conflict("email"));
            }
        }
        Ok(users.get_mut(&id).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }

    async fn link_google(&self, id: Uuid, uid: &str, email_verified: bool) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.google_uid = Some(uid.to_string());
            user.is_email_verified = user.is_email_verified || email_verified;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn set_user_deleted(&self, id: Uuid, deleted: bool) -> Result<Option<User>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            let now = Utc::now();
            user.is_deleted = deleted;
            user.deleted_at = deleted.then_some(now);
            user.updated_at = now;
            user.clone()
        }))
    }

    async fn purge_user(&self, id: Uuid) -> Result<bool, StoreError> {
        self.refresh_tokens.write().await.remove(&id);
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn purge_users(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        let mut tokens = self.refresh_tokens.write().await;
        let mut users = self.users.write().await;
        let mut removed = 0;
        for id in ids {
            tokens.remove(id);
            if users.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn list_users(&self, query: &UserListQuery) -> Result<Page<User>, StoreError> {
        let search = query.page.search().map(str::to_lowercase);
        let mut rows: Vec<User> = self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.is_deleted == query.deleted)
            .filter(|u| {
                search.as_deref().is_none_or(|term| {
                    contains_ci(u.full_name.as_deref(), term)
                        || contains_ci(Some(u.email.as_str()), term)
                        || contains_ci(u.mobile.as_deref(), term)
                })
            })
            .cloned()
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match query.sort {
                UserSort::CreatedAt => a.created_at.cmp(&b.created_at),
                UserSort::FullName => a.full_name.cmp(&b.full_name),
                UserSort::Email => a.email.cmp(&b.email),
            };
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        Ok(paginate(rows, &query.page))
    }
}

#[async_trait]
impl AdminStore for MemoryStore {
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, StoreError> {
        let mut admins = self.admins.write().await;
        if admins.values().any(|a| a.email == admin.email) {
            return Err(StoreError::Conflict("email"));
        }
        let admin = admin.into_admin();
        admins.insert(admin.id, admin.clone());
        Ok(admin)
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        Ok(self.admins.read().await.get(&id).cloned())
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        Ok(self.admins.read().await.values().find(|a| a.email == email).cloned())
    }

    async fn update_admin(&self, id: Uuid, update: &AdminUpdate) -> Result<Option<Admin>, StoreError> {
        let mut admins = self.admins.write().await;
        if let Some(email) = &update.email {
            if admins.values().any(|a| a.id != id && &a.email == email) {
                return Err(StoreError::Conflict("email"));
            }
        }
        Ok(admins.get_mut(&id).map(|admin| {
            update.apply(admin);
            admin.clone()
        }))
    }

    async fn set_admin_password(&self, id: Uuid, password_hash: &str) -> Result<bool, StoreError> {
        let mut admins = self.admins.write().await;
        Ok(admins
            .get_mut(&id)
            .map(|admin| {
                admin.password_hash = password_hash.to_string();
                admin.reset_token = None;
                admin.reset_token_expires_at = None;
                admin.updated_at = Utc::now();
            })
            .is_some())
    }

    async fn set_admin_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut admins = self.admins.write().await;
        Ok(admins
            .get_mut(&id)
            .map(|admin| {
                admin.reset_token = Some(token.to_string());
                admin.reset_token_expires_at = Some(expires_at);
            })
            .is_some())
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryStore {
    async fn put_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.refresh_tokens
            .write()
            .await
            .insert(user_id, (token.to_string(), expires_at));
        Ok(())
    }

    async fn refresh_token(&self, user_id: Uuid) -> Result<Option<String>, StoreError> {
        let now = Utc::now();
        Ok(self
            .refresh_tokens
            .read()
            .await
            .get(&user_id)
            .filter(|(_, expires_at)| *expires_at > now)
            .map(|(token, _)| token.clone()))
    }

    async fn revoke_refresh_token(&self, user_id: Uuid) -> Result<(), StoreError> {
        self.refresh_tokens.write().await.remove(&user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::AuthProvider;
    use crate::staging::model::fixtures::details;
    use chrono::Duration;

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            full_name: Some(name.to_string()),
            mobile: None,
            password_hash: None,
            profile_img: None,
            google_uid: None,
            auth_provider: AuthProvider::Email,
            is_email_verified: false,
        }
    }

    #[tokio::test]
    async fn test_project_scope_hides_foreign_projects() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let project = Project::create(details("Loft"), owner, None).unwrap();
        store.insert_project(&project).await.unwrap();

        assert!(store
            .find_project(project.id, ProjectScope::Owner(owner))
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_project(project.id, ProjectScope::Owner(Uuid::new_v4()))
            .await
            .unwrap()
            .is_none());
        assert!(store
            .delete_project(project.id, ProjectScope::Owner(Uuid::new_v4()))
            .await
            .unwrap()
            .is_none());
        assert!(store.find_project(project.id, ProjectScope::All).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_project_listing_pages_and_searches() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for name in ["Loft", "Barn", "Lofty Attic"] {
            let project = Project::create(details(name), owner, None).unwrap();
            store.insert_project(&project).await.unwrap();
        }

        let query = PageQuery {
            search: Some("loft".into()),
            limit: Some(1),
            ..Default::default()
        };
        let page = store.list_projects(ProjectScope::Owner(owner), &query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.pagination.total_count, 2);
        assert!(page.pagination.has_next_page);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let store = MemoryStore::new();
        let project = Project::create(details("Loft"), Uuid::new_v4(), None).unwrap();
        store.insert_project(&project).await.unwrap();

        let query = PageQuery {
            page: Some(u64::MAX),
            ..Default::default()
        };
        let page = store.list_projects(ProjectScope::All, &query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.pagination.total_count, 1);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        store.create_user(new_user("ana@example.com", "Ana")).await.unwrap();
        let err = store.create_user(new_user("ana@example.com", "Ana")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict("email")));
    }

    #[tokio::test]
    async fn test_soft_delete_moves_between_lists() {
        let store = MemoryStore::new();
        let ana = store.create_user(new_user("ana@example.com", "Ana")).await.unwrap();
        store.create_user(new_user("bo@example.com", "Bo")).await.unwrap();

        store.set_user_deleted(ana.id, true).await.unwrap();

        let active = store.list_users(&UserListQuery::default()).await.unwrap();
        let deleted = store
            .list_users(&UserListQuery {
                deleted: true,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(active.items.len(), 1);
        assert_eq!(deleted.items[0].id, ana.id);
        assert!(deleted.items[0].deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_user_sort_by_name() {
        let store = MemoryStore::new();
        store.create_user(new_user("c@example.com", "Cy")).await.unwrap();
        store.create_user(new_user("a@example.com", "Al")).await.unwrap();

        let page = store
            .list_users(&UserListQuery {
                sort: UserSort::FullName,
                order: SortOrder::Asc,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.items[0].full_name.as_deref(), Some("Al"));
    }

    #[tokio::test]
    async fn test_expired_refresh_token_is_ignored() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store
            .put_refresh_token(user, "old", Utc::now() - Duration::seconds(1))
            .await
            .unwrap();
        assert!(store.refresh_token(user).await.unwrap().is_none());

        store
            .put_refresh_token(user, "new", Utc::now() + Duration::days(1))
            .await
            .unwrap();
        assert_eq!(store.refresh_token(user).await.unwrap().as_deref(), Some("new"));
    }
}
