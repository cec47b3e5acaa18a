//! Integration tests for the published key set endpoint.
//!
//! Identity providers are wiremock servers serving JWKS documents; the
//! router runs in-process.

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sg_be::config::IdentityProviderConfig;

const JWKS_PATH: &str = "/.well-known/jwks.json";

fn rsa_jwks(keys: &[(&str, &str)]) -> Value {
    json!({
        "keys": keys
            .iter()
            .map(|(kid, modulus)| json!({
                "kty": "RSA",
                "kid": kid,
                "alg": "RS256",
                "use": "sig",
                "n": modulus,
                "e": "AQAB",
            }))
            .collect::<Vec<_>>()
    })
}

async fn mount_jwks(server: &MockServer, document: Value) {
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(document))
        .mount(server)
        .await;
}

fn provider(id: &str, server: &MockServer) -> IdentityProviderConfig {
    IdentityProviderConfig {
        id: id.to_string(),
        jwks_url: format!("{}{}", server.uri(), JWKS_PATH),
    }
}

async fn get_jwks(app: Router) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .uri(JWKS_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn kids(body: &Value) -> Vec<&str> {
    body["keys"]
        .as_array()
        .expect("keys array")
        .iter()
        .map(|key| key["kid"].as_str().expect("kid string"))
        .collect()
}

#[tokio::test]
async fn test_jwks_endpoint_merges_providers() {
    let provider_a = MockServer::start().await;
    let provider_b = MockServer::start().await;
    mount_jwks(&provider_a, rsa_jwks(&[("kid-a", "bW9kLWE")])).await;
    mount_jwks(
        &provider_b,
        rsa_jwks(&[("kid-b1", "bW9kLWIx"), ("kid-b2", "bW9kLWIy")]),
    )
    .await;

    let mut env_vars = common::test_env_vars();
    env_vars.identity_providers = vec![
        provider("alpha", &provider_a),
        provider("beta", &provider_b),
    ];

    let (status, body) = get_jwks(common::build_app(env_vars)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kids(&body), vec!["kid-a", "kid-b1", "kid-b2"]);
}

#[tokio::test]
async fn test_jwks_endpoint_degrades_when_one_provider_is_down() {
    let provider_a = MockServer::start().await;
    let provider_b = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(JWKS_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&provider_a)
        .await;
    mount_jwks(
        &provider_b,
        rsa_jwks(&[("kid-b1", "bW9kLWIx"), ("kid-b2", "bW9kLWIy")]),
    )
    .await;

    let mut env_vars = common::test_env_vars();
    env_vars.identity_providers = vec![
        provider("alpha", &provider_a),
        provider("beta", &provider_b),
    ];

    let (status, body) = get_jwks(common::build_app(env_vars)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kids(&body), vec!["kid-b1", "kid-b2"]);
}

#[tokio::test]
async fn test_jwks_endpoint_fails_when_all_providers_are_down() {
    let provider_a = MockServer::start().await;
    let provider_b = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&provider_a)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&provider_b)
        .await;

    let mut env_vars = common::test_env_vars();
    env_vars.identity_providers = vec![
        provider("alpha", &provider_a),
        provider("beta", &provider_b),
    ];

    let (status, body) = get_jwks(common::build_app(env_vars)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_jwks_endpoint_serves_cached_set_after_provider_loss() {
    let provider_a = MockServer::start().await;
    mount_jwks(&provider_a, rsa_jwks(&[("kid-a", "bW9kLWE")])).await;

    let mut env_vars = common::test_env_vars();
    env_vars.identity_providers = vec![provider("alpha", &provider_a)];
    let app = common::build_app(env_vars);

    let (status, body) = get_jwks(app.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kids(&body), vec!["kid-a"]);

    // Provider disappears; the combined set keeps serving from cache
    provider_a.reset().await;

    let (status, body) = get_jwks(app).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kids(&body), vec!["kid-a"]);
}

#[tokio::test]
async fn test_jwks_endpoint_drops_colliding_kids() {
    let provider_a = MockServer::start().await;
    let provider_b = MockServer::start().await;
    mount_jwks(
        &provider_a,
        rsa_jwks(&[("kid-shared", "bW9kdWx1cy1hbHBoYQ"), ("kid-a", "bW9kLWE")]),
    )
    .await;
    mount_jwks(&provider_b, rsa_jwks(&[("kid-shared", "bW9kdWx1cy1iZXRh")])).await;

    let mut env_vars = common::test_env_vars();
    env_vars.identity_providers = vec![
        provider("alpha", &provider_a),
        provider("beta", &provider_b),
    ];

    let (status, body) = get_jwks(common::build_app(env_vars)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kids(&body), vec!["kid-a"]);
}

#[tokio::test]
async fn test_jwks_endpoint_skips_provider_with_incomplete_keys() {
    let provider_a = MockServer::start().await;
    let provider_b = MockServer::start().await;
    // Key entry without a kid: the whole provider contributes zero keys
    mount_jwks(
        &provider_a,
        json!({
            "keys": [{ "kty": "RSA", "alg": "RS256", "use": "sig", "n": "bW9kLWE", "e": "AQAB" }]
        }),
    )
    .await;
    mount_jwks(&provider_b, rsa_jwks(&[("kid-b", "bW9kLWI")])).await;

    let mut env_vars = common::test_env_vars();
    env_vars.identity_providers = vec![
        provider("alpha", &provider_a),
        provider("beta", &provider_b),
    ];

    let (status, body) = get_jwks(common::build_app(env_vars)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kids(&body), vec!["kid-b"]);
}

#[tokio::test]
async fn test_jwks_endpoint_without_providers_is_empty() {
    let (status, body) = get_jwks(common::build_app(common::test_env_vars())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["keys"], json!([]));
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::build_app(common::test_env_vars());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}
