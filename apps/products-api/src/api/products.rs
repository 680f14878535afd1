//! Products API routes

use axum::{middleware, Router};
use axum_helpers::{jwt_auth_middleware, JwtVerifier};
use domain_products::{handlers, ProductRepository, ProductService};

/// Products router with token verification in front of every handler
pub fn router<R: ProductRepository + 'static>(
    service: ProductService<R>,
    verifier: JwtVerifier,
) -> Router {
    handlers::router(service).layer(middleware::from_fn_with_state(
        verifier,
        jwt_auth_middleware,
    ))
}
