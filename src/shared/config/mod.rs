//! Application configuration module
//!
//! Configuration is read from the environment (after `.env` has been loaded by
//! the binary) into an [`AppConfig`]. Tests and embedders build one directly
//! with [`AppConfig::builder`].

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Secret used when `JWT_SECRET` is unset in debug builds.
const DEV_JWT_SECRET: &str = "staging-dev-secret-change-me";

/// SMTP settings for outgoing mail
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Staging <no-reply@example.com>`
    pub from: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to
    pub server_port: u16,
    /// Postgres connection string; `None` selects the in-memory stores
    pub database_url: Option<String>,
    /// Secret for access tokens
    pub jwt_secret: String,
    /// Secret for refresh tokens
    pub jwt_refresh_secret: String,
    /// Lifetime of access tokens issued at login
    pub access_token_ttl: Duration,
    /// Lifetime of refresh tokens
    pub refresh_token_ttl: Duration,
    /// Lifetime of access tokens minted from a refresh token
    pub refreshed_access_ttl: Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Directory uploaded files are written to
    pub upload_dir: PathBuf,
    /// Prefix for public file URLs, e.g. `https://api.example.com`
    pub public_base_url: Option<String>,
    /// Largest accepted upload in bytes
    pub max_upload_bytes: usize,
    /// OAuth client id Google ID tokens must be issued for
    pub google_client_id: Option<String>,
    /// Base URL of the web frontend, used in password reset links
    pub frontend_url: String,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Unset optional values fall back to development defaults. A missing
    /// `JWT_SECRET` is an error in release builds.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = AppConfig::builder();

        if let Some(port) = env("SERVER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT", port))?;
            builder = builder.server_port(port);
        }
        if let Some(url) = env("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        match env("JWT_SECRET") {
            Some(secret) => builder = builder.jwt_secret(secret),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using development secret");
                builder = builder.jwt_secret(DEV_JWT_SECRET);
            }
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
        }
        if let Some(secret) = env("JWT_REFRESH_SECRET") {
            builder = builder.jwt_refresh_secret(secret);
        }
        if let Some(ttl) = env("JWT_ACCESS_TOKEN_EXPIRY") {
            builder = builder.access_token_ttl(parse_duration(&ttl)?);
        }
        if let Some(ttl) = env("JWT_REFRESH_TOKEN_EXPIRY") {
            builder = builder.refresh_token_ttl(parse_duration(&ttl)?);
        }
        if let Some(cost) = env("BCRYPT_COST") {
            let cost = cost
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue("BCRYPT_COST", cost))?;
            builder = builder.bcrypt_cost(cost);
        }
        if let Some(dir) = env("UPLOAD_DIR") {
            builder = builder.upload_dir(dir);
        }
        if let Some(url) = env("PUBLIC_BASE_URL") {
            builder = builder.public_base_url(url);
        }
        if let Some(max) = env("MAX_UPLOAD_BYTES") {
            let max = max
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES", max))?;
            builder = builder.max_upload_bytes(max);
        }
        if let Some(client_id) = env("GOOGLE_CLIENT_ID") {
            builder = builder.google_client_id(client_id);
        }
        if let Some(url) = env("FRONTEND_URL") {
            builder = builder.frontend_url(url);
        }
        if let (Some(host), Some(from)) = (env("SMTP_HOST"), env("SMTP_FROM")) {
            builder = builder.smtp(SmtpConfig {
                host,
                username: env("SMTP_USERNAME").unwrap_or_default(),
                password: env("SMTP_PASSWORD").unwrap_or_default(),
                from,
            });
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST",
                self.bcrypt_cost.to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue("MAX_UPLOAD_BYTES", "0".to_string()));
        }
        if let Some(url) = &self.public_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    server_port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    jwt_refresh_secret: Option<String>,
    access_token_ttl: Option<Duration>,
    refresh_token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
    upload_dir: Option<PathBuf>,
    public_base_url: Option<String>,
    max_upload_bytes: Option<usize>,
    google_client_id: Option<String>,
    frontend_url: Option<String>,
    smtp: Option<SmtpConfig>,
}

impl AppConfigBuilder {
    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Defaults to the access token secret when unset
    pub fn jwt_refresh_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_refresh_secret = Some(secret.into());
        self
    }

    pub fn access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = Some(ttl);
        self
    }

    pub fn refresh_token_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_token_ttl = Some(ttl);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn upload_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = Some(dir.into());
        self
    }

    pub fn public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = Some(url.into());
        self
    }

    pub fn max_upload_bytes(mut self, max: usize) -> Self {
        self.max_upload_bytes = Some(max);
        self
    }

    pub fn google_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.google_client_id = Some(client_id.into());
        self
    }

    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = Some(url.into());
        self
    }

    pub fn smtp(mut self, smtp: SmtpConfig) -> Self {
        self.smtp = Some(smtp);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?;
        let config = AppConfig {
            server_port: self.server_port.unwrap_or(3000),
            database_url: self.database_url,
            jwt_refresh_secret: self.jwt_refresh_secret.unwrap_or_else(|| jwt_secret.clone()),
            jwt_secret,
            access_token_ttl: self.access_token_ttl.unwrap_or(Duration::from_secs(7 * 86_400)),
            refresh_token_ttl: self.refresh_token_ttl.unwrap_or(Duration::from_secs(30 * 86_400)),
            refreshed_access_ttl: Duration::from_secs(15 * 60),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(10),
            upload_dir: self.upload_dir.unwrap_or_else(|| PathBuf::from("uploads")),
            public_base_url: self
                .public_base_url
                .map(|url| url.trim_end_matches('/').to_string()),
            max_upload_bytes: self.max_upload_bytes.unwrap_or(5 * 1024 * 1024),
            google_client_id: self.google_client_id,
            frontend_url: self
                .frontend_url
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            smtp: self.smtp,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse a duration written as `<n><unit>` with unit `s`, `m`, `h` or `d`.
///
/// A bare number is read as seconds.
pub fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    let value = value.trim();
    let invalid = || ConfigError::InvalidDuration(value.to_string());

    let (digits, multiplier) = match value.char_indices().last() {
        Some((idx, 's')) => (&value[..idx], 1),
        Some((idx, 'm')) => (&value[..idx], 60),
        Some((idx, 'h')) => (&value[..idx], 3_600),
        Some((idx, 'd')) => (&value[..idx], 86_400),
        Some(_) => (value, 1),
        None => return Err(invalid()),
    };
    let amount = digits.parse::<u64>().map_err(|_| invalid())?;
    amount
        .checked_mul(multiplier)
        .map(Duration::from_secs)
        .ok_or_else(invalid)
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("invalid duration: {0}")]
    InvalidDuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = AppConfig::builder().jwt_secret("secret").build().unwrap();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.jwt_refresh_secret, "secret");
        assert_eq!(config.access_token_ttl, Duration::from_secs(7 * 86_400));
        assert_eq!(config.refreshed_access_ttl, Duration::from_secs(900));
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_builder_requires_secret() {
        let result = AppConfig::builder().build();
        assert!(matches!(result, Err(ConfigError::MissingValue("JWT_SECRET"))));
    }

    #[test]
    fn test_rejects_bad_bcrypt_cost() {
        let result = AppConfig::builder().jwt_secret("s").bcrypt_cost(2).build();
        assert!(matches!(result, Err(ConfigError::InvalidValue("BCRYPT_COST", _))));
    }

    #[test]
    fn test_public_base_url_is_trimmed() {
        let config = AppConfig::builder()
            .jwt_secret("s")
            .public_base_url("https://api.example.com/")
            .build()
            .unwrap();
        assert_eq!(config.public_base_url.as_deref(), Some("https://api.example.com"));
    }

    #[test]
    fn test_rejects_relative_public_url() {
        let result = AppConfig::builder()
            .jwt_secret("s")
            .public_base_url("api.example.com")
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(900));
        assert_eq!(parse_duration("7d").unwrap(), Duration::from_secs(604_800));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7_200));
        assert_eq!(parse_duration("45s").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_duration("120").unwrap(), Duration::from_secs(120));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("d").is_err());
        assert!(parse_duration("7w").is_err());
        assert!(parse_duration("-5m").is_err());
    }
}
