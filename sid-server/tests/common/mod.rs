#![allow(dead_code)]

//! Test infrastructure for sid-server API tests

use sid_auth::{RateLimitConfig, SessionTokenService};
use sid_crypto::AtRestCipher;
use sid_server::identity::IdentityService;
use sid_server::state::AppState;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use serde_json::{Value, json};

pub const TEST_TOKEN_SECRET: &[u8] = b"integration-test-token-secret-32b!";

/// Low KDF iteration count; key-stretching strength is not under test
pub const TEST_KDF_ITERATIONS: u32 = 1_000;

/// Create AppState for testing, with a generous login rate limit so
/// multi-attempt tests don't trip it
pub async fn create_test_state() -> AppState {
    create_test_state_with_rate_limit(RateLimitConfig {
        max_attempts: 1_000,
        window_secs: 60,
    })
    .await
}

pub async fn create_test_state_with_rate_limit(rate_limit: RateLimitConfig) -> AppState {
    let pool = sid_db::connect_in_memory()
        .await
        .expect("Failed to create test database");

    let tokens = Arc::new(SessionTokenService::with_hs256(TEST_TOKEN_SECRET, 3600));
    let cipher = AtRestCipher::new("integration-test-master-secret", TEST_KDF_ITERATIONS)
        .expect("Failed to build cipher");

    let identity = IdentityService::new(pool.clone(), cipher, Arc::clone(&tokens), rate_limit)
        .expect("Failed to build identity service");

    AppState {
        pool,
        identity: Arc::new(identity),
        tokens,
    }
}

/// Registration payload with sensible defaults
pub fn register_payload(email: &str) -> Value {
    json!({
        "email": email,
        "password": "Passw0rd!",
        "full_name": "Jane Doe",
        "id_number": "1234 5678 9012",
    })
}

pub fn login_payload(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Collect a response body into parsed JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes (for byte-identical comparisons)
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}
