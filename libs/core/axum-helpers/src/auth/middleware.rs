use super::jwt::{AuthError, JwtVerifier};
use crate::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively. A present header in any other
/// shape is malformed, not missing.
fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or(AuthError::MissingToken)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::Malformed("authorization header is not ASCII".into()))?;

    match value.trim().split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim().to_string())
        }
        _ => Err(AuthError::Malformed(
            "format is Authorization: Bearer <token>".into(),
        )),
    }
}

/// JWT authentication middleware
///
/// Verifies the bearer token and inserts [`AuthClaims`](super::AuthClaims)
/// into request extensions on success. Any failure short-circuits with `401`
/// before the handler runs.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum::routing::get;
/// use axum_helpers::{JwtVerifier, jwt_auth_middleware};
///
/// let protected_routes = Router::new()
///     .route("/products", get(list_products))
///     .layer(axum::middleware::from_fn_with_state(
///         verifier.clone(),
///         jwt_auth_middleware,
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(verifier): State<JwtVerifier>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).inspect_err(|e| {
        tracing::debug!(reason = ?e, "No usable bearer token");
    })?;

    let claims = verifier.verify(&token).await.inspect_err(|e| {
        tracing::debug!(reason = ?e, "JWT verification failed");
    })?;

    tracing::debug!(sub = %claims.sub, "Bearer token accepted");
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthClaims, AuthConfig, StaticKeySource};
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use test_utils::TestIssuer;
    use tower::ServiceExt;

    fn app(issuer: &TestIssuer) -> Router {
        let config = AuthConfig::new(issuer.audience(), issuer.issuer());
        let verifier =
            JwtVerifier::with_source(&config, Arc::new(StaticKeySource::new(issuer.jwk_set())));

        Router::new()
            .route(
                "/whoami",
                get(|Extension(claims): Extension<AuthClaims>| async move { claims.sub }),
            )
            .layer(axum::middleware::from_fn_with_state(
                verifier,
                jwt_auth_middleware,
            ))
    }

    async fn call(authorization: Option<String>) -> (StatusCode, String) {
        let issuer = TestIssuer::new();
        let mut request = Request::get("/whoami");
        if let Some(value) = authorization {
            request = request.header("authorization", value);
        }

        let response = app(&issuer)
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn details(body: &str) -> String {
        let json: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(json["message"], "Unauthorized");
        json["details"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_valid_token_passes_claims_to_handler() {
        let token = TestIssuer::new().token();
        let (status, body) = call(Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, TestIssuer::SUBJECT);
    }

    #[tokio::test]
    async fn test_lowercase_scheme_is_accepted() {
        let token = TestIssuer::new().token();
        let (status, _) = call(Some(format!("bearer {}", token))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, body) = call(None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(details(&body), "No authorization token was found");
    }

    #[tokio::test]
    async fn test_wrong_scheme_is_invalid_token() {
        let (status, body) = call(Some("Basic dXNlcjpwYXNz".into())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(details(&body), "Invalid token");
    }

    #[tokio::test]
    async fn test_expired_token() {
        let token = TestIssuer::new().expired_token();
        let (status, body) = call(Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(details(&body), "Token expired");
    }

    #[tokio::test]
    async fn test_untrusted_signature() {
        let token = TestIssuer::new().untrusted_token();
        let (status, body) = call(Some(format!("Bearer {}", token))).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(details(&body).starts_with("JWT error:"));
    }
}
