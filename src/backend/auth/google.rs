/**
 * Google Sign-In
 *
 * Verifies a Google ID token by asking Google's `tokeninfo` endpoint and
 * checking the audience against `GOOGLE_CLIENT_ID`. The handler only sees
 * the resulting `GoogleProfile`, so tests substitute their own verifier.
 */

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

const TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Identity asserted by a verified ID token
#[derive(Debug, Clone, PartialEq)]
pub struct GoogleProfile {
    pub uid: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub email_verified: bool,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid Google token")]
    Rejected,

    #[error("Google sign-in is not configured")]
    NotConfigured,

    #[error("Google token verification failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, IdentityError>;
}

#[derive(Debug, Deserialize)]
struct TokenInfo {
    sub: String,
    aud: String,
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<serde_json::Value>,
    name: Option<String>,
    picture: Option<String>,
}

impl TokenInfo {
    fn into_profile(self, client_id: &str) -> Result<GoogleProfile, IdentityError> {
        if self.aud != client_id {
            tracing::warn!(aud = %self.aud, "Google token issued for another client");
            return Err(IdentityError::Rejected);
        }
        let email = self.email.ok_or(IdentityError::Rejected)?;
        // tokeninfo reports booleans as strings
        let email_verified = match self.email_verified {
            Some(serde_json::Value::Bool(value)) => value,
            Some(serde_json::Value::String(value)) => value == "true",
            _ => false,
        };
        Ok(GoogleProfile {
            uid: self.sub,
            email,
            name: self.name,
            picture: self.picture,
            email_verified,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GoogleTokenVerifier {
    client: reqwest::Client,
    client_id: Option<String>,
}

impl GoogleTokenVerifier {
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
        }
    }
}

#[async_trait]
impl IdentityVerifier for GoogleTokenVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleProfile, IdentityError> {
        let client_id = self.client_id.as_deref().ok_or(IdentityError::NotConfigured)?;

        let response = self
            .client
            .get(TOKENINFO_URL)
            .query(&[("id_token", id_token)])
            .send()
            .await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Google rejected ID token");
            return Err(IdentityError::Rejected);
        }

        response.json::<TokenInfo>().await?.into_profile(client_id)
    }
}
