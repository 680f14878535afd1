use jsonwebtoken::{Algorithm, Validation, decode, decode_header, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use super::config::AuthConfig;
use super::jwks::{HttpKeySource, JwksCache, KeySource};
use crate::errors::AppError;

/// Why a bearer token was rejected.
///
/// The `Display` text is the detail string sent to the client alongside the
/// generic `Unauthorized` message. `Malformed` keeps its reason for logs only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("No authorization token was found")]
    MissingToken,

    #[error("Invalid token")]
    Malformed(String),

    #[error("Token expired")]
    Expired,

    #[error("JWT error: {0}")]
    InvalidSignature(String),

    #[error("{0}")]
    Unknown(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => AuthError::Malformed(err.to_string()),
            ErrorKind::InvalidSignature => AuthError::InvalidSignature("invalid signature".into()),
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::InvalidSignature("invalid algorithm".into())
            }
            ErrorKind::InvalidAudience => AuthError::InvalidSignature("audience invalid".into()),
            ErrorKind::InvalidIssuer => AuthError::InvalidSignature("issuer invalid".into()),
            ErrorKind::ImmatureSignature => AuthError::InvalidSignature("token not active".into()),
            ErrorKind::MissingRequiredClaim(claim) => {
                AuthError::InvalidSignature(format!("missing required claim: {}", claim))
            }
            _ => AuthError::Unknown(err.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(err.to_string())
    }
}

/// `aud` may be a single string or a list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(a) => a == audience,
            Audience::Multiple(list) => list.iter().any(|a| a == audience),
        }
    }
}

/// Verified token payload, inserted into request extensions by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthClaims {
    pub sub: String,
    pub iss: String,
    pub aud: Audience,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Verifies RS256 bearer tokens against the issuer's published keys.
///
/// # Example
/// ```ignore
/// use axum_helpers::{AuthConfig, JwtVerifier};
/// use core_config::FromEnv;
///
/// let verifier = JwtVerifier::from_config(&AuthConfig::from_env()?)?;
/// let claims = verifier.verify(token).await?;
/// ```
#[derive(Clone)]
pub struct JwtVerifier {
    keys: Arc<JwksCache>,
    validation: Arc<Validation>,
}

impl JwtVerifier {
    /// Verifier backed by the issuer's JWKS endpoint.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let source = HttpKeySource::new(config.jwks_url(), config.jwks_timeout)?;
        tracing::info!(jwks_url = %source.url(), audience = %config.audience, "JWT verifier initialized");
        Ok(Self::with_source(config, Arc::new(source)))
    }

    pub fn with_source(config: &AuthConfig, source: Arc<dyn KeySource>) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss", "sub"]);

        Self {
            keys: Arc::new(JwksCache::from_config(source, config)),
            validation: Arc::new(validation),
        }
    }

    /// Check signature, algorithm, expiry, audience and issuer.
    ///
    /// Anything other than RS256 is rejected before a key is looked up.
    pub async fn verify(&self, token: &str) -> Result<AuthClaims, AuthError> {
        let header = decode_header(token).map_err(|e| AuthError::Malformed(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidSignature("invalid algorithm".into()));
        }

        let key = self.keys.decoding_key(header.kid.as_deref()).await?;
        let data = decode::<AuthClaims>(token, &key, &self.validation)?;

        Ok(data.claims)
    }
}
