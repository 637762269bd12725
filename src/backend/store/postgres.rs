/**
 * PostgreSQL Store
 *
 * Implements every store trait on a `PgPool`. Projects are stored one row
 * per project; areas, hotspots, info markers and the item library are JSONB
 * columns written back in full on every save.
 *
 * Unique violations on `email` surface as `StoreError::Conflict("email")`.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::admin::accounts::{Admin, AdminUpdate, NewAdmin};
use crate::backend::auth::users::{NewUser, ProfileUpdate, User, UserListQuery};
use crate::backend::store::{
    like_pattern, AdminStore, ProjectScope, ProjectStore, RefreshTokenStore, StoreError, UserStore,
};
use crate::shared::{Page, PageQuery};
use crate::staging::{Area, Hotspot, InfoMarker, LibraryItem, Project, ProjectImage};

const PROJECT_COLUMNS: &str = "id, project_name, street_address, apt_landmark, city_locality, state, country, note, \
     image, areas, hotspots, info, items, created_by, created_at, updated_at";

const USER_COLUMNS: &str = "id, email, full_name, mobile, password_hash, profile_img, google_uid, auth_provider, \
     is_email_verified, is_deleted, deleted_at, created_at, updated_at";

const ADMIN_COLUMNS: &str = "id, first_name, last_name, email, password_hash, profile_img, reset_token, \
     reset_token_expires_at, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and bring the schema up to date
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url).await?;
        sqlx::migrate!().run(&pool).await?;
        Ok(Self::new(pool))
    }
}

fn map_unique(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict("email"),
        _ => StoreError::Database(err),
    }
}

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    project_name: String,
    street_address: String,
    apt_landmark: Option<String>,
    city_locality: String,
    state: String,
    country: String,
    note: Option<String>,
    image: Option<Json<ProjectImage>>,
    areas: Json<Vec<Area>>,
    hotspots: Json<Vec<Hotspot>>,
    info: Json<Vec<InfoMarker>>,
    items: Json<Vec<LibraryItem>>,
    created_by: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            project_name: row.project_name,
            street_address: row.street_address,
            apt_landmark: row.apt_landmark,
            city_locality: row.city_locality,
            state: row.state,
            country: row.country,
            note: row.note,
            image: row.image.map(|Json(image)| image),
            areas: row.areas.0,
            hotspots: row.hotspots.0,
            info: row.info.0,
            items: row.items.0,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    async fn insert_project(&self, project: &Project) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO staging_projects
                (id, project_name, street_address, apt_landmark, city_locality, state, country, note,
                 image, areas, hotspots, info, items, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(project.id)
        .bind(&project.project_name)
        .bind(&project.street_address)
        .bind(project.apt_landmark.as_deref())
        .bind(&project.city_locality)
        .bind(&project.state)
        .bind(&project.country)
        .bind(project.note.as_deref())
        .bind(project.image.as_ref().map(Json))
        .bind(Json(&project.areas))
        .bind(Json(&project.hotspots))
        .bind(Json(&project.info))
        .bind(Json(&project.items))
        .bind(project.created_by)
        .bind(project.created_at)
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_project(&self, id: Uuid, scope: ProjectScope) -> Result<Option<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM staging_projects WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2)",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .bind(scope.owner())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Project::from))
    }

    async fn save_project(&self, project: &Project) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE staging_projects
            SET project_name = $2, street_address = $3, apt_landmark = $4, city_locality = $5,
                state = $6, country = $7, note = $8, image = $9, areas = $10, hotspots = $11,
                info = $12, items = $13, updated_at = $14
            WHERE id = $1
            "#,
        )
        .bind(project.id)
        .bind(&project.project_name)
        .bind(&project.street_address)
        .bind(project.apt_landmark.as_deref())
        .bind(&project.city_locality)
        .bind(&project.state)
        .bind(&project.country)
        .bind(project.note.as_deref())
        .bind(project.image.as_ref().map(Json))
        .bind(Json(&project.areas))
        .bind(Json(&project.hotspots))
        .bind(Json(&project.info))
        .bind(Json(&project.items))
        .bind(project.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_project(&self, id: Uuid, scope: ProjectScope) -> Result<Option<Project>, StoreError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "DELETE FROM staging_projects WHERE id = $1 AND ($2::uuid IS NULL OR created_by = $2) RETURNING {}",
            PROJECT_COLUMNS
        ))
        .bind(id)
        .bind(scope.owner())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Project::from))
    }

    async fn delete_projects(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM staging_projects WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_projects(&self, scope: ProjectScope, query: &PageQuery) -> Result<Page<Project>, StoreError> {
        let pattern = query.search().map(like_pattern);
        let filter = "($1::uuid IS NULL OR created_by = $1) AND ($2::text IS NULL OR project_name ILIKE $2)";

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM staging_projects WHERE {}", filter))
            .bind(scope.owner())
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {} FROM staging_projects WHERE {} ORDER BY created_at DESC, id DESC LIMIT $3 OFFSET $4",
            PROJECT_COLUMNS, filter
        ))
        .bind(scope.owner())
        .bind(pattern.as_deref())
        .bind(query.limit() as i64)
        .bind(query.sql_offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows.into_iter().map(Project::from).collect();
        Ok(Page::new(items, query, total.max(0) as u64))
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.into_user();
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {cols}
            "#,
            cols = USER_COLUMNS
        ))
        .bind(user.id)
        .bind(&user.email)
        .bind(user.full_name.as_deref())
        .bind(user.mobile.as_deref())
        .bind(user.password_hash.as_deref())
        .bind(user.profile_img.as_deref())
        .bind(user.google_uid.as_deref())
        .bind(&user.auth_provider)
        .bind(user.is_email_verified)
        .bind(user.is_deleted)
        .bind(user.deleted_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_google_uid(&self, uid: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE google_uid = $1", USER_COLUMNS))
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update_user(&self, id: Uuid, update: &ProfileUpdate) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                email = COALESCE($3, email),
                mobile = COALESCE($4, mobile),
                profile_img = COALESCE($5, profile_img),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(update.full_name.as_deref())
        .bind(update.email.as_deref())
        .bind(update.mobile.as_deref())
        .bind(update.profile_img.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn link_google(&self, id: Uuid, uid: &str, email_verified: bool) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET google_uid = $2, is_email_verified = is_email_verified OR $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(uid)
        .bind(email_verified)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn set_user_deleted(&self, id: Uuid, deleted: bool) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET is_deleted = $2,
                deleted_at = CASE WHEN $2 THEN NOW() ELSE NULL END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(deleted)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn purge_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn purge_users(&self, ids: &[Uuid]) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_users(&self, query: &UserListQuery) -> Result<Page<User>, StoreError> {
        let pattern = query.page.search().map(like_pattern);
        let filter = "is_deleted = $1 AND ($2::text IS NULL OR full_name ILIKE $2 OR email ILIKE $2 OR mobile ILIKE $2)";

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM users WHERE {}", filter))
            .bind(query.deleted)
            .bind(pattern.as_deref())
            .fetch_one(&self.pool)
            .await?;

        // sort column and direction come from closed enums
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE {} ORDER BY {} {} NULLS LAST, id LIMIT $3 OFFSET $4",
            USER_COLUMNS,
            filter,
            query.sort.column(),
            query.order.keyword()
        ))
        .bind(query.deleted)
        .bind(pattern.as_deref())
        .bind(query.page.limit() as i64)
        .bind(query.page.sql_offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(users, &query.page, total.max(0) as u64))
    }
}

#[async_trait]
impl AdminStore for PgStore {
    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, StoreError> {
        let admin = admin.into_admin();
        sqlx::query_as::<_, Admin>(&format!(
            r#"
            INSERT INTO admins ({cols})
            VALUES ($1, $2, $3, $4, $5, $6, NULL, NULL, $7, $8)
            RETURNING {cols}
            "#,
            cols = ADMIN_COLUMNS
        ))
        .bind(admin.id)
        .bind(&admin.first_name)
        .bind(&admin.last_name)
        .bind(&admin.email)
        .bind(&admin.password_hash)
        .bind(admin.profile_img.as_deref())
        .bind(admin.created_at)
        .bind(admin.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn find_admin(&self, id: Uuid) -> Result<Option<Admin>, StoreError> {
        let admin = sqlx::query_as::<_, Admin>(&format!("SELECT {} FROM admins WHERE id = $1", ADMIN_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let admin = sqlx::query_as::<_, Admin>(&format!("SELECT {} FROM admins WHERE email = $1", ADMIN_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    async fn update_admin(&self, id: Uuid, update: &AdminUpdate) -> Result<Option<Admin>, StoreError> {
        sqlx::query_as::<_, Admin>(&format!(
            r#"
            UPDATE admins
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                email = COALESCE($4, email),
                profile_img = COALESCE($5, profile_img),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ADMIN_COLUMNS
        ))
        .bind(id)
        .bind(update.first_name.as_deref())
        .bind(update.last_name.as_deref())
        .bind(update.email.as_deref())
        .bind(update.profile_img.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique)
    }

    async fn set_admin_password(&self, id: Uuid, password_hash: &str) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE admins
            SET password_hash = $2, reset_token = NULL, reset_token_expires_at = NULL, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_admin_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE admins SET reset_token = $2, reset_token_expires_at = $3 WHERE id = $1")
            .bind(id)
            .bind(token)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl RefreshTokenStore for PgStore {
    async fn put_refresh_token(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE SET token = EXCLUDED.token, expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn refresh_token(&self, user_id: Uuid) -> Result<Option<String>, StoreError> {
        let token = sqlx::query_scalar::<_, String>(
            "SELECT token FROM refresh_tokens WHERE user_id = $1 AND expires_at > NOW()",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(token)
    }

    async fn revoke_refresh_token(&self, user_id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
