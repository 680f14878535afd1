//! Bearer-token verification settings.
//!
//! Implements the `FromEnv` trait from `core_config`, following the same
//! pattern as `ServerConfig` and `MongoConfig`.

use core_config::{ConfigError, FromEnv, env_parsed_or, env_required};
use std::time::Duration;

/// Token issuer settings used to verify incoming bearer tokens.
///
/// Loaded from environment variables:
/// - `AUTH0_AUDIENCE` (required) - expected `aud` claim
/// - `AUTH0_DOMAIN` (required) - issuer URL; expected `iss` claim and JWKS host
/// - `AUTH_JWKS_REQUESTS_PER_MINUTE` (optional, default: 5)
///
/// # Example
///
/// ```ignore
/// use axum_helpers::AuthConfig;
/// use core_config::FromEnv;
///
/// let config = AuthConfig::from_env()?;
///
/// let config = AuthConfig::new("https://products.example.com", "https://tenant.auth0.com/");
/// assert_eq!(config.jwks_url(), "https://tenant.auth0.com/.well-known/jwks.json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthConfig {
    /// Expected `aud` claim
    pub audience: String,

    /// Issuer URL, compared verbatim against the `iss` claim
    pub domain: String,

    /// Maximum number of key set fetches per minute
    pub jwks_requests_per_minute: u32,

    /// Timeout for a single key set fetch
    pub jwks_timeout: Duration,

    /// Cache lifetime when the issuer sends no `Cache-Control: max-age`
    pub default_cache_ttl: Duration,
}

impl AuthConfig {
    pub fn new(audience: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
            domain: domain.into(),
            jwks_requests_per_minute: 5,
            jwks_timeout: Duration::from_secs(10),
            default_cache_ttl: Duration::from_secs(600),
        }
    }

    pub fn with_jwks_requests_per_minute(mut self, requests: u32) -> Self {
        self.jwks_requests_per_minute = requests;
        self
    }

    /// Expected `iss` claim.
    pub fn issuer(&self) -> &str {
        &self.domain
    }

    /// `<domain>/.well-known/jwks.json`, tolerating a trailing slash on the domain.
    pub fn jwks_url(&self) -> String {
        format!(
            "{}/.well-known/jwks.json",
            self.domain.trim_end_matches('/')
        )
    }
}

impl FromEnv for AuthConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let audience = env_required("AUTH0_AUDIENCE")?;
        let domain = env_required("AUTH0_DOMAIN")?;

        if !domain.starts_with("https://") && !domain.starts_with("http://") {
            return Err(ConfigError::ParseError {
                key: "AUTH0_DOMAIN".to_string(),
                details: format!("expected an http(s) URL, got '{}'", domain),
            });
        }

        let requests = env_parsed_or("AUTH_JWKS_REQUESTS_PER_MINUTE", 5u32)?;
        if requests == 0 {
            return Err(ConfigError::ParseError {
                key: "AUTH_JWKS_REQUESTS_PER_MINUTE".to_string(),
                details: "must be at least 1".to_string(),
            });
        }

        Ok(Self::new(audience, domain).with_jwks_requests_per_minute(requests))
    }
}
