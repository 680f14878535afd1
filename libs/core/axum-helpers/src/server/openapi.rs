use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

/// Name of the bearer security scheme referenced by `security(("bearer_auth" = []))`.
pub const BEARER_AUTH: &str = "bearer_auth";

/// Registers an HTTP bearer (JWT) security scheme on the OpenAPI document.
///
/// # Example
/// ```ignore
/// #[derive(OpenApi)]
/// #[openapi(paths(list_products), modifiers(&BearerSecurity), security(("bearer_auth" = [])))]
/// pub struct ApiDoc;
/// ```
pub struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            BEARER_AUTH,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
