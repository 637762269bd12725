/**
 * Admin Accounts
 *
 * Admins are a separate account table from users. They sign in with email and
 * password only, and may reset a forgotten password through a mailed,
 * single-use token.
 */

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

/// How long a password reset token stays valid
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Admin {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_img: Option<String>,
    pub reset_token: Option<String>,
    pub reset_token_expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_img: Option<String>,
}

impl NewAdmin {
    pub(crate) fn into_admin(self) -> Admin {
        let now = Utc::now();
        Admin {
            id: Uuid::new_v4(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            profile_img: self.profile_img,
            reset_token: None,
            reset_token_expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_img: Option<String>,
}

impl AdminUpdate {
    pub(crate) fn apply(&self, admin: &mut Admin) {
        if let Some(first_name) = &self.first_name {
            admin.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            admin.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            admin.email = email.clone();
        }
        if let Some(profile_img) = &self.profile_img {
            admin.profile_img = Some(profile_img.clone());
        }
        admin.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_img: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Admin> for AdminResponse {
    fn from(admin: &Admin) -> Self {
        Self {
            id: admin.id,
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
            email: admin.email.clone(),
            profile_img: admin.profile_img.clone(),
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

/// 32 random bytes, hex encoded
pub fn generate_reset_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}

pub fn reset_token_expiry(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(RESET_TOKEN_TTL_MINUTES)
}
