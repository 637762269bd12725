//! Common test utilities and helpers
//!
//! - `TestApp`: the full router over in-memory stores, a temporary upload
//!   directory, a recording mailer and a fake Google verifier
//! - Account helpers for users and admins
//! - Image parts for multipart requests
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum_test::multipart::Part;
use axum_test::TestServer;
use serde_json::{json, Value};
use staging_backend::backend::auth::google::{GoogleProfile, IdentityError, IdentityVerifier};
use staging_backend::backend::auth::mailer::{MailError, Mailer};
use staging_backend::backend::routes::create_router;
use staging_backend::backend::server::state::AppState;
use staging_backend::shared::AppConfig;
use tempfile::TempDir;

pub const JWT_SECRET: &str = "test-access-secret";
pub const JWT_REFRESH_SECRET: &str = "test-refresh-secret";
pub const PASSWORD: &str = "Passw0rd!";
pub const GOOGLE_TOKEN: &str = "valid-google-token";
pub const FRONTEND_URL: &str = "https://admin.example.test";

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Mailer that keeps every message in memory
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: String) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            html,
        });
        Ok(())
    }
}

/// Accepts only [`GOOGLE_TOKEN`]
pub struct FakeGoogle {
    pub profile: GoogleProfile,
}

#[async_trait]
impl IdentityVerifier for FakeGoogle {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, IdentityError> {
        if id_token == GOOGLE_TOKEN {
            Ok(self.profile.clone())
        } else {
            Err(IdentityError::Rejected)
        }
    }
}

pub fn google_profile() -> GoogleProfile {
    GoogleProfile {
        uid: "google-uid-123".to_string(),
        email: "gina@example.com".to_string(),
        name: Some("Gina Google".to_string()),
        picture: Some("https://example.test/gina.png".to_string()),
        email_verified: true,
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
    pub uploads: TempDir,
}

pub fn test_config(upload_dir: &std::path::Path) -> AppConfig {
    AppConfig::builder()
        .jwt_secret(JWT_SECRET)
        .jwt_refresh_secret(JWT_REFRESH_SECRET)
        .bcrypt_cost(4)
        .upload_dir(upload_dir)
        .max_upload_bytes(64 * 1024)
        .frontend_url(FRONTEND_URL)
        .build()
        .expect("valid test config")
}

pub fn spawn_app() -> TestApp {
    let uploads = TempDir::new().expect("temp upload dir");
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::in_memory(test_config(uploads.path()))
        .with_mailer(mailer.clone())
        .with_identity(Arc::new(FakeGoogle {
            profile: google_profile(),
        }));
    let server = TestServer::new(create_router(state.clone())).expect("test server");

    TestApp {
        server,
        state,
        mailer,
        uploads,
    }
}

pub fn authorization() -> HeaderName {
    HeaderName::from_static("authorization")
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header value")
}

/// A small PNG-typed upload
pub fn image_part(file_name: &str) -> Part {
    Part::bytes(b"\x89PNG\r\n\x1a\nfake image bytes".to_vec())
        .file_name(file_name.to_string())
        .mime_type("image/png")
}

/// Signed-in user
pub struct Session {
    pub user_id: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestApp {
    pub async fn register(&self, email: &str) -> Session {
        let response = self
            .server
            .post("/api/users/register")
            .json(&json!({
                "fullName": "Test User",
                "email": email,
                "password": PASSWORD,
            }))
            .await;
        let body: Value = response.json();
        assert_eq!(response.status_code(), 201, "register failed: {}", body);

        Session {
            user_id: body["data"]["user"]["_id"].as_str().unwrap().to_string(),
            access_token: body["data"]["accessToken"].as_str().unwrap().to_string(),
            refresh_token: body["data"]["refreshToken"].as_str().unwrap().to_string(),
        }
    }

    /// Create an admin through the public endpoint and return its token
    pub async fn create_admin(&self, email: &str) -> String {
        let response = self
            .server
            .post("/api/admin/create")
            .json(&json!({
                "firstName": "Ada",
                "lastName": "Admin",
                "email": email,
                "password": PASSWORD,
            }))
            .await;
        let body: Value = response.json();
        assert_eq!(response.status_code(), 201, "admin create failed: {}", body);
        body["data"]["accessToken"].as_str().unwrap().to_string()
    }
}
