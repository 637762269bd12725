/**
 * Authentication Handler Types
 *
 * Request and response bodies for the `/api/users` endpoints. Request fields
 * are optional at the serde level so missing fields produce the endpoint's
 * own 400 message instead of a generic deserialization rejection.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::{SortOrder, UserResponse, UserSort};
use crate::shared::{PageQuery, Pagination};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub mobile: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInRequest {
    #[serde(alias = "token")]
    pub id_token: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub profile_img: Option<String>,
    /// Present only to be rejected
    pub password: Option<serde_json::Value>,
}

/// `?page=&limit=&search=&sortBy=&sortOrder=`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserListParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub sort_by: Option<UserSort>,
    pub sort_order: Option<SortOrder>,
}

impl UserListParams {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
            search: self.search.clone(),
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteRequest {
    #[serde(default, alias = "userIds")]
    pub ids: Vec<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Serialize, Debug)]
pub struct UsersPage {
    pub users: Vec<UserResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    pub deleted_count: u64,
}
