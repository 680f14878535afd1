//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI documentation and cross-cutting middleware
//! - Health and readiness helpers
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//!
//! let app = create_router::<ApiDoc>(api_routes, &cors)
//!     .merge(health_router(app_info.clone()));
//!
//! create_production_app(app, &server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod openapi;
pub mod shutdown;

pub use app::{REQUEST_TIMEOUT, create_production_app, create_router};
pub use health::{HealthCheckFuture, HealthResponse, health_router, run_health_checks};
pub use openapi::{BEARER_AUTH, BearerSecurity};
pub use shutdown::ShutdownCoordinator;
