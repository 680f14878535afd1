//! # Axum Helpers
//!
//! Shared building blocks for the product service's HTTP layer.
//!
//! ## Modules
//!
//! - **[`auth`]**: RS256 bearer-token verification against a cached, rate-limited JWKS
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (ObjectId path, validated JSON)
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum_helpers::{AuthConfig, CorsConfig, JwtVerifier, create_router, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let verifier = JwtVerifier::from_config(&AuthConfig::from_env()?)?;
//! let api_routes = handlers::router(service)
//!     .layer(axum::middleware::from_fn_with_state(verifier, jwt_auth_middleware));
//!
//! let router = create_router::<ApiDoc>(api_routes, &CorsConfig::from_env()?);
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    AuthClaims, AuthConfig, AuthError, HttpKeySource, JwtVerifier, KeySource, StaticKeySource,
    jwt_auth_middleware,
};

// Re-export server types
pub use server::{
    BEARER_AUTH, BearerSecurity, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
    create_production_app, create_router, health_router, run_health_checks,
};

// Re-export HTTP middleware
pub use http::{CorsConfig, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{ObjectIdPath, ValidatedJson};
