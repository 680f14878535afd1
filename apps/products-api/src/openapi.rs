//! OpenAPI documentation configuration

use axum_helpers::BearerSecurity;
use utoipa::OpenApi;

/// Combined OpenAPI documentation, served at `/apispec`
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Service API",
        description = "Product catalogue API. Every route requires an RS256 bearer token."
    ),
    nest(
        (path = "/api", api = domain_products::ApiDoc)
    ),
    modifiers(&BearerSecurity),
    security(("bearer_auth" = [])),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;
