//! API routes module

pub mod health;
pub mod products;

use axum::Router;
use axum_helpers::JwtVerifier;
use domain_products::{ProductRepository, ProductService};

/// Create all routes served under `/api`; every one of them sits behind the bearer gate
pub fn routes<R: ProductRepository + 'static>(
    service: ProductService<R>,
    verifier: JwtVerifier,
) -> Router {
    products::router(service, verifier)
}
