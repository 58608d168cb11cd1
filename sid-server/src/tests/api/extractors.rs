use crate::identity::IdentityService;
use crate::routes::build_router;
use crate::state::AppState;

use sid_auth::{RateLimitConfig, SessionTokenService};
use sid_crypto::AtRestCipher;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

const TEST_TOKEN_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

// Low iteration count keeps cipher setup fast; security margins are not
// under test here.
const TEST_KDF_ITERATIONS: u32 = 1_000;

async fn test_state() -> AppState {
    let pool = sid_db::connect_in_memory().await.unwrap();
    let tokens = Arc::new(SessionTokenService::with_hs256(TEST_TOKEN_SECRET, 3600));
    let cipher = AtRestCipher::new("unit-test-master-secret", TEST_KDF_ITERATIONS).unwrap();
    let identity = IdentityService::new(
        pool.clone(),
        cipher,
        Arc::clone(&tokens),
        RateLimitConfig::default(),
    )
    .unwrap();

    AppState {
        pool,
        identity: Arc::new(identity),
        tokens,
    }
}

async fn error_code(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["error"]["code"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn given_no_authorization_header_when_me_then_401() {
    let app = build_router(test_state().await);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "UNAUTHENTICATED");
}

#[tokio::test]
async fn given_non_bearer_scheme_when_me_then_401() {
    let app = build_router(test_state().await);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_garbage_token_when_me_then_401() {
    let app = build_router(test_state().await);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .header("Authorization", "Bearer not.a.token")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(response).await, "UNAUTHENTICATED");
}

#[tokio::test]
async fn given_valid_token_for_absent_user_when_me_then_404() {
    let state = test_state().await;
    // Well-formed, correctly signed token whose subject never registered
    let token = state
        .tokens
        .issue(&Uuid::new_v4().to_string(), "ghost@example.com")
        .unwrap();

    let app = build_router(state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/me")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    // The extractor accepts the token; the lookup fails afterwards.
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
