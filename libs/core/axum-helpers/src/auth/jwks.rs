//! Signing key retrieval for bearer-token verification.
//!
//! The issuer publishes its public keys as a JWKS document. Keys are cached
//! in-process for as long as the issuer's `Cache-Control: max-age` allows
//! (or a configured default), and refetches are rate limited so a flood of
//! tokens with unknown `kid`s cannot hammer the issuer.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use jsonwebtoken::{
    DecodingKey,
    jwk::{Jwk, JwkSet},
};
use reqwest::header::CACHE_CONTROL;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use super::config::AuthConfig;
use super::jwt::AuthError;

/// A key set as returned by a [`KeySource`].
#[derive(Debug, Clone)]
pub struct FetchedKeys {
    pub keys: JwkSet,
    /// Lifetime advertised by the source, if any
    pub max_age: Option<Duration>,
}

/// Where signing keys come from.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn fetch(&self) -> Result<FetchedKeys, AuthError>;
}

/// Fetches the issuer's JWKS over HTTP.
#[derive(Clone, Debug)]
pub struct HttpKeySource {
    client: reqwest::Client,
    url: String,
}

impl HttpKeySource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl KeySource for HttpKeySource {
    async fn fetch(&self) -> Result<FetchedKeys, AuthError> {
        info!(url = %self.url, "Fetching signing keys");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        let max_age = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_max_age);

        let keys = response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::Unknown(e.to_string()))?;

        Ok(FetchedKeys { keys, max_age })
    }
}

/// Serves a fixed key set. Used for pinned keys and in tests.
#[derive(Clone, Debug)]
pub struct StaticKeySource {
    keys: JwkSet,
}

impl StaticKeySource {
    pub fn new(keys: JwkSet) -> Self {
        Self { keys }
    }
}

#[async_trait]
impl KeySource for StaticKeySource {
    async fn fetch(&self) -> Result<FetchedKeys, AuthError> {
        Ok(FetchedKeys {
            keys: self.keys.clone(),
            max_age: None,
        })
    }
}

/// Extract `max-age` from a `Cache-Control` header value.
pub fn parse_max_age(value: &str) -> Option<Duration> {
    value.split(',').find_map(|directive| {
        let (name, secs) = directive.trim().split_once('=')?;
        if name.trim().eq_ignore_ascii_case("max-age") {
            secs.trim().trim_matches('"').parse().ok().map(Duration::from_secs)
        } else {
            None
        }
    })
}

struct CachedKeys {
    keys: JwkSet,
    fetched_at: Instant,
    ttl: Duration,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.ttl
    }
}

/// Read-mostly cache of signing keys in front of a [`KeySource`].
///
/// Lookups only take the read lock. Refetches run under a separate refresh
/// guard and hold no cache lock while the source is fetched.
pub struct JwksCache {
    source: Arc<dyn KeySource>,
    cached: RwLock<Option<CachedKeys>>,
    refresh: Mutex<()>,
    limiter: DefaultDirectRateLimiter,
    default_ttl: Duration,
}

impl JwksCache {
    pub fn new(source: Arc<dyn KeySource>, requests_per_minute: u32, default_ttl: Duration) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);

        Self {
            source,
            cached: RwLock::new(None),
            refresh: Mutex::new(()),
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
            default_ttl,
        }
    }

    pub fn from_config(source: Arc<dyn KeySource>, config: &AuthConfig) -> Self {
        Self::new(
            source,
            config.jwks_requests_per_minute,
            config.default_cache_ttl,
        )
    }

    /// Resolve the decoding key for a token's `kid`.
    ///
    /// A token without `kid` is accepted only when the issuer publishes a
    /// single key.
    pub async fn decoding_key(&self, kid: Option<&str>) -> Result<DecodingKey, AuthError> {
        let jwk = match self.lookup(kid).await? {
            Some(jwk) => jwk,
            None => self.refresh_and_lookup(kid).await?,
        };

        DecodingKey::from_jwk(&jwk).map_err(|e| AuthError::InvalidSignature(e.to_string()))
    }

    async fn lookup(&self, kid: Option<&str>) -> Result<Option<Jwk>, AuthError> {
        let cached = self.cached.read().await;
        match cached.as_ref() {
            Some(entry) if entry.is_fresh() => select_key(&entry.keys, kid),
            _ => Ok(None),
        }
    }

    async fn refresh_and_lookup(&self, kid: Option<&str>) -> Result<Jwk, AuthError> {
        // One refetch at a time; readers never touch this guard.
        let _refresh = self.refresh.lock().await;

        // Another request may have refreshed while we waited for the guard.
        if let Some(jwk) = self.lookup(kid).await? {
            return Ok(jwk);
        }

        if self.limiter.check().is_err() {
            warn!(kid = ?kid, "Signing key refetch rate limited");
            return Err(key_not_found());
        }

        let fetched = self.source.fetch().await?;
        let ttl = fetched.max_age.unwrap_or(self.default_ttl);
        debug!(keys = fetched.keys.keys.len(), ttl_secs = ttl.as_secs(), "Signing keys cached");

        let selected = select_key(&fetched.keys, kid);
        *self.cached.write().await = Some(CachedKeys {
            keys: fetched.keys,
            fetched_at: Instant::now(),
            ttl,
        });

        selected?.ok_or_else(key_not_found)
    }
}

fn key_not_found() -> AuthError {
    AuthError::InvalidSignature("signing key not found".to_string())
}

fn select_key(keys: &JwkSet, kid: Option<&str>) -> Result<Option<Jwk>, AuthError> {
    match kid {
        Some(kid) => Ok(keys.find(kid).cloned()),
        None => match keys.keys.as_slice() {
            [] => Ok(None),
            [only] => Ok(Some(only.clone())),
            _ => Err(AuthError::Malformed(
                "token has no kid and the issuer publishes several keys".to_string(),
            )),
        },
    }
}
