//! End-to-end tests for the Products API
//!
//! The full router (middleware stack, bearer gate, handlers) runs over the
//! in-memory repository. Tokens are signed with the test issuer's fixture
//! keys and verified through a static key source, so no network is needed.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use axum_helpers::{AuthConfig, CorsConfig, JwtVerifier, StaticKeySource};
use core_config::AppInfo;
use domain_products::{InMemoryProductRepository, ProductService};
use http_body_util::BodyExt;
use products_api::build_router;
use serde_json::{json, Value};
use std::sync::Arc;
use test_utils::TestIssuer;
use tower::ServiceExt; // For oneshot()

struct TestApp {
    router: Router,
    issuer: TestIssuer,
}

impl TestApp {
    fn new() -> Self {
        let issuer = TestIssuer::new();
        let auth = AuthConfig::new(issuer.audience(), issuer.issuer());
        let verifier =
            JwtVerifier::with_source(&auth, Arc::new(StaticKeySource::new(issuer.jwk_set())));

        let router = build_router(
            ProductService::new(InMemoryProductRepository::new()),
            verifier,
            &CorsConfig::default(),
            AppInfo::new("product-service", "1.0.0"),
        );

        Self { router, issuer }
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn authed(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let token = self.issuer.token();
        self.request(method, uri, Some(&token), body).await
    }
}

fn widget(name: &str, price: i64) -> Value {
    json!({ "name": name, "description": "A useful widget", "price": price })
}

/// Every gated route, with a body where the verb takes one
fn gated_routes() -> Vec<(&'static str, &'static str, Option<Value>)> {
    let id = "/api/products/507f1f77bcf86cd799439011";
    vec![
        ("GET", "/api/products", None),
        ("POST", "/api/products", Some(widget("Widget", 500))),
        ("GET", "/api/products/name/Widget", None),
        ("GET", id, None),
        ("PUT", id, Some(widget("Widget", 500))),
        ("DELETE", id, None),
        ("GET", "/api/products/not-an-id", None),
    ]
}

#[tokio::test]
async fn test_product_lifecycle() {
    let app = TestApp::new();

    let (status, created) = app
        .authed("POST", "/api/products", Some(widget("Widget", 500)))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["productId"].as_str().unwrap().to_string();
    let uri = format!("/api/products/{}", id);

    let (status, fetched) = app.authed("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = app.authed("PUT", &uri, Some(widget("Widget2", 600))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["productId"], id);
    assert_eq!(updated["name"], "Widget2");
    assert_eq!(updated["price"], 600);

    let (status, _) = app.authed("DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.authed("GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_missing_token_is_rejected_everywhere() {
    let app = TestApp::new();

    for (method, uri, body) in gated_routes() {
        let (status, response) = app.request(method, uri, None, body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(response["message"], "Unauthorized");
        assert_eq!(response["details"], "No authorization token was found");
    }
}

#[tokio::test]
async fn test_expired_token_is_rejected_everywhere() {
    let app = TestApp::new();
    let token = app.issuer.expired_token();

    for (method, uri, body) in gated_routes() {
        let (status, response) = app.request(method, uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(response["details"], "Token expired");
    }
}

#[tokio::test]
async fn test_hs256_token_is_rejected_everywhere() {
    let app = TestApp::new();
    let token = app.issuer.hs256_token();

    for (method, uri, body) in gated_routes() {
        let (status, _) = app.request(method, uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }
}

#[tokio::test]
async fn test_untrusted_signer_is_rejected_everywhere() {
    let app = TestApp::new();
    let token = app.issuer.untrusted_token();

    for (method, uri, body) in gated_routes() {
        let (status, response) = app.request(method, uri, Some(&token), body).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}", method, uri);
        assert_eq!(response["details"], "JWT error: invalid signature");
    }
}

#[tokio::test]
async fn test_rejected_writes_do_not_reach_storage() {
    let app = TestApp::new();
    let expired = app.issuer.expired_token();

    app.request("POST", "/api/products", None, Some(widget("Ghost", 1)))
        .await;
    app.request("POST", "/api/products", Some(&expired), Some(widget("Ghost", 1)))
        .await;

    let (status, listed) = app.authed("GET", "/api/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_wrong_audience_is_rejected() {
    let app = TestApp::new();
    let token = app
        .issuer
        .token_for_audience("https://someone-else.example.com");

    let (status, response) = app.request("GET", "/api/products", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["details"], "JWT error: audience invalid");
}

#[tokio::test]
async fn test_health_and_docs_are_public() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["name"], "product-service");

    let (status, spec) = app.request("GET", "/apispec/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(spec["info"]["title"], "Product Service API");
    assert!(spec["paths"]["/api/products"].is_object());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let (status, body) = app.request("GET", "/nope", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
