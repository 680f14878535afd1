//! Bearer-token authorization against a remote JWKS.
//!
//! This module provides:
//! - `AuthConfig`, loaded from the environment
//! - A cached, rate-limited signing key lookup (`JwksCache` over a `KeySource`)
//! - `JwtVerifier`, which accepts RS256 tokens only
//! - `jwt_auth_middleware` for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{AuthConfig, JwtVerifier, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let verifier = JwtVerifier::from_config(&AuthConfig::from_env()?)?;
//!
//! let protected = Router::new()
//!     .route("/products", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(verifier, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwks;
pub mod jwt;
pub mod middleware;

pub use config::AuthConfig;
pub use jwks::{FetchedKeys, HttpKeySource, JwksCache, KeySource, StaticKeySource};
pub use jwt::{Audience, AuthClaims, AuthError, JwtVerifier};
pub use middleware::jwt_auth_middleware;
