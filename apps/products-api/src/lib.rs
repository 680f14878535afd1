//! Products API
//!
//! Wires the products domain into an HTTP server: configuration, the bearer
//! gate in front of `/api`, OpenAPI docs and health probes.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use axum_helpers::{create_router, health_router, CorsConfig, JwtVerifier};
use core_config::AppInfo;
use domain_products::{ProductRepository, ProductService};

pub use config::Config;
pub use state::AppState;

/// Full application router minus the readiness probe.
///
/// `/api/products...` is gated, `/health` and `/apispec` are public.
pub fn build_router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    verifier: JwtVerifier,
    cors: &CorsConfig,
    app_info: AppInfo,
) -> Router {
    let api_routes = api::routes(service, verifier);

    create_router::<openapi::ApiDoc>(api_routes, cors).merge(health_router(app_info))
}
