/**
 * Session Tokens
 *
 * This module issues and verifies the JWTs used for user and admin sessions.
 *
 * # Tokens
 *
 * - Access tokens (HS256, `JWT_SECRET`) carry the account id, email and a
 *   `role` claim so a user token is never accepted on admin routes and vice
 *   versa
 * - Refresh tokens (HS256, `JWT_REFRESH_SECRET`) are issued to users only and
 *   are also stored server-side, one per user; a refresh token that is no
 *   longer the stored one is rejected
 *
 * Lifetimes come from configuration. Access tokens minted from a refresh
 * token use the shorter `refreshed_access_ttl`.
 */

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::AppConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub exp: u64,
    pub iat: u64,
}

impl Claims {
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Failed to encode token: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

#[derive(Clone)]
pub struct TokenService {
    access: Arc<Keys>,
    refresh: Arc<Keys>,
    access_ttl: Duration,
    refresh_ttl: Duration,
    refreshed_access_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

fn now_secs() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

impl TokenService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            access: Arc::new(Keys::new(&config.jwt_secret)),
            refresh: Arc::new(Keys::new(&config.jwt_refresh_secret)),
            access_ttl: config.access_token_ttl,
            refresh_ttl: config.refresh_token_ttl,
            refreshed_access_ttl: config.refreshed_access_ttl,
        }
    }

    /// Access token for a fresh login
    pub fn issue_access(&self, id: Uuid, email: &str, role: Role) -> Result<String, TokenError> {
        self.sign(&self.access, id, email, role, self.access_ttl)
            .map(|(token, _)| token)
    }

    /// Short-lived access token minted from a refresh token
    pub fn issue_refreshed_access(&self, id: Uuid, email: &str) -> Result<String, TokenError> {
        self.sign(&self.access, id, email, Role::User, self.refreshed_access_ttl)
            .map(|(token, _)| token)
    }

    /// Refresh token and the moment it expires
    pub fn issue_refresh(&self, id: Uuid, email: &str) -> Result<(String, DateTime<Utc>), TokenError> {
        self.sign(&self.refresh, id, email, Role::User, self.refresh_ttl)
    }

    pub fn verify_access(&self, token: &str) -> Result<Claims, TokenError> {
        verify(&self.access, token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<Claims, TokenError> {
        verify(&self.refresh, token)
    }

    fn sign(
        &self,
        keys: &Keys,
        id: Uuid,
        email: &str,
        role: Role,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), TokenError> {
        let iat = now_secs();
        let claims = Claims {
            sub: id.to_string(),
            email: email.to_string(),
            role,
            exp: iat + ttl.as_secs(),
            iat,
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).map_err(TokenError::Encoding)?;
        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp as i64, 0).unwrap_or_else(Utc::now);
        Ok((token, expires_at))
    }
}

fn verify(keys: &Keys, token: &str) -> Result<Claims, TokenError> {
    decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn service() -> TokenService {
        let config = AppConfig::builder()
            .jwt_secret("access-secret")
            .jwt_refresh_secret("refresh-secret")
            .build()
            .unwrap();
        TokenService::new(&config)
    }

    fn expired_token(keys: &Keys) -> String {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "ana@example.com".into(),
            role: Role::User,
            exp: now_secs() - 3600,
            iat: now_secs() - 7200,
        };
        encode(&Header::default(), &claims, &keys.encoding).unwrap()
    }

    #[test]
    fn test_access_token_round_trip() {
        let tokens = service();
        let id = Uuid::new_v4();
        let token = tokens.issue_access(id, "ana@example.com", Role::Admin).unwrap();

        let claims = tokens.verify_access(&token).unwrap();
        assert_eq!(claims.subject().unwrap(), id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.email, "ana@example.com");
    }

    #[test]
    fn test_refresh_and_access_keys_differ() {
        let tokens = service();
        let (refresh, expires_at) = tokens.issue_refresh(Uuid::new_v4(), "ana@example.com").unwrap();

        assert!(expires_at > Utc::now());
        assert_matches!(tokens.verify_access(&refresh), Err(TokenError::Invalid));
        assert!(tokens.verify_refresh(&refresh).is_ok());
    }

    #[test]
    fn test_expired_token_is_distinguished() {
        let tokens = service();
        let token = expired_token(&tokens.access);
        assert_matches!(tokens.verify_access(&token), Err(TokenError::Expired));
        assert_matches!(tokens.verify_access("not.a.token"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_refreshed_access_is_short_lived() {
        let tokens = service();
        let token = tokens.issue_refreshed_access(Uuid::new_v4(), "ana@example.com").unwrap();
        let claims = tokens.verify_access(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.role, Role::User);
    }
}
