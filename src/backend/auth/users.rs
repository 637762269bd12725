/**
 * User Model
 *
 * This module defines the user account record, the values used to create and
 * update it, and the rules applied to emails and passwords before they reach
 * the store.
 *
 * # Accounts
 *
 * - `email` accounts have a bcrypt password hash
 * - `google` accounts are created by Google sign-in and have no password
 *   until one is set; an email account that signs in with Google is linked by
 *   email and keeps its password
 *
 * Deleting a user is a soft delete (`is_deleted` + `deleted_at`). Deleted
 * users cannot sign in and are listed separately for admins.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{PageQuery, SharedError};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub mobile: Option<String>,
    pub password_hash: Option<String>,
    pub profile_img: Option<String>,
    pub google_uid: Option<String>,
    /// `email` or `google`
    pub auth_provider: String,
    pub is_email_verified: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Email,
    Google,
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: Option<String>,
    pub mobile: Option<String>,
    pub password_hash: Option<String>,
    pub profile_img: Option<String>,
    pub google_uid: Option<String>,
    pub auth_provider: AuthProvider,
    pub is_email_verified: bool,
}

impl NewUser {
    pub(crate) fn into_user(self) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            email: self.email,
            full_name: self.full_name,
            mobile: self.mobile,
            password_hash: self.password_hash,
            profile_img: self.profile_img,
            google_uid: self.google_uid,
            auth_provider: self.auth_provider.as_str().to_string(),
            is_email_verified: self.is_email_verified,
            is_deleted: false,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields a user may change on their own profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub profile_img: Option<String>,
}

impl ProfileUpdate {
    pub(crate) fn apply(&self, user: &mut User) {
        if let Some(full_name) = &self.full_name {
            user.full_name = Some(full_name.clone());
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(mobile) = &self.mobile {
            user.mobile = Some(mobile.clone());
        }
        if let Some(profile_img) = &self.profile_img {
            user.profile_img = Some(profile_img.clone());
        }
        user.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum UserSort {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "fullName")]
    FullName,
    #[serde(rename = "email")]
    Email,
}

impl UserSort {
    pub(crate) fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::FullName => "full_name",
            Self::Email => "email",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Admin listing of users
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub page: PageQuery,
    /// List soft-deleted users instead of active ones
    pub deleted: bool,
    pub sort: UserSort,
    pub order: SortOrder,
}

/// User as returned by the API; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub mobile: Option<String>,
    pub profile_img: Option<String>,
    pub auth_provider: String,
    pub is_email_verified: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            mobile: user.mobile.clone(),
            profile_img: user.profile_img.clone(),
            auth_provider: user.auth_provider.clone(),
            is_email_verified: user.is_email_verified,
            is_deleted: user.is_deleted,
            deleted_at: user.deleted_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Trim and lowercase an email, rejecting anything without a local part and
/// a dotted domain.
pub fn normalize_email(email: &str) -> Result<String, SharedError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(email)
    } else {
        Err(SharedError::validation("email", "Invalid email address"))
    }
}

/// At least 8 characters with an uppercase letter, a lowercase letter and a
/// digit.
pub fn validate_password(password: &str) -> Result<(), SharedError> {
    let strong = password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit());
    if strong {
        Ok(())
    } else {
        Err(SharedError::validation(
            "password",
            "Password must be at least 8 characters and contain uppercase, lowercase and a number",
        ))
    }
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, BackendError> {
    bcrypt::hash(password, cost).map_err(|e| {
        tracing::error!("Password hashing error: {:?}", e);
        BackendError::internal("password hashing failed")
    })
}

/// `false` for a wrong password or a malformed stored hash
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or_else(|e| {
        tracing::warn!("Password verification error: {:?}", e);
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM ").unwrap(), "ana@example.com");
        assert!(normalize_email("ana@example").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ana example@x.com").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(validate_password("Secret123").is_ok());
        assert!(validate_password("secret123").is_err());
        assert!(validate_password("SECRET123").is_err());
        assert!(validate_password("Secretabc").is_err());
        assert!(validate_password("Sec123").is_err());
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret123", 4).unwrap();
        assert!(verify_password("Secret123", &hash));
        assert!(!verify_password("Secret124", &hash));
        assert!(!verify_password("Secret123", "not-a-hash"));
    }

    #[test]
    fn test_profile_update_only_touches_given_fields() {
        let mut user = NewUser {
            email: "ana@example.com".into(),
            full_name: Some("Ana".into()),
            mobile: None,
            password_hash: None,
            profile_img: None,
            google_uid: None,
            auth_provider: AuthProvider::Email,
            is_email_verified: false,
        }
        .into_user();

        ProfileUpdate {
            mobile: Some("555".into()),
            ..Default::default()
        }
        .apply(&mut user);

        assert_eq!(user.full_name.as_deref(), Some("Ana"));
        assert_eq!(user.mobile.as_deref(), Some("555"));
        assert_eq!(user.auth_provider, "email");
    }

    #[test]
    fn test_response_hides_hash() {
        let user = NewUser {
            email: "ana@example.com".into(),
            full_name: None,
            mobile: None,
            password_hash: Some("$2b$hash".into()),
            profile_img: None,
            google_uid: None,
            auth_provider: AuthProvider::Email,
            is_email_verified: false,
        }
        .into_user();
        let value = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["email"], "ana@example.com");
    }
}
