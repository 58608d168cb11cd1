//! Integration tests for registration and login
mod common;

use crate::common::{
    body_bytes, body_json, create_test_state, create_test_state_with_rate_limit, login_payload,
    post_json, register_payload,
};

use axum::http::StatusCode;
use sid_auth::RateLimitConfig;
use sid_server::routes::build_router;
use tower::ServiceExt;

#[tokio::test]
async fn test_register_returns_profile_and_token() {
    let state = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["user"]["email"], "jane@example.com");
    assert_eq!(json["user"]["full_name"], "Jane Doe");
    // Separators stripped during normalization
    assert_eq!(json["user"]["id_number"], "123456789012");
    assert!(!json["user"]["id"].as_str().unwrap().is_empty());
    assert!(!json["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_response_never_contains_password_or_ciphertext() {
    let state = create_test_state().await;
    let app = build_router(state);

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("encrypted_id_number").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflict() {
    let state = create_test_state().await;
    let app = build_router(state);

    let first = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["error"]["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn test_register_differently_cased_email_conflicts() {
    let state = create_test_state().await;
    let app = build_router(state);

    let first = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    // Same address after normalization
    let second = app
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("Jane@Example.COM"),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_short_id_number_rejected() {
    let state = create_test_state().await;
    let app = build_router(state);

    let mut payload = register_payload("jane@example.com");
    payload["id_number"] = "12345".into();

    let response = app
        .oneshot(post_json("/api/v1/auth/register", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "id_number");
}

#[tokio::test]
async fn test_register_empty_password_rejected() {
    let state = create_test_state().await;
    let app = build_router(state);

    let mut payload = register_payload("jane@example.com");
    payload["password"] = "".into();

    let response = app
        .oneshot(post_json("/api/v1/auth/register", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_register_malformed_email_rejected() {
    let state = create_test_state().await;
    let app = build_router(state);

    let mut payload = register_payload("not-an-address");
    payload["email"] = "not-an-address".into();

    let response = app
        .oneshot(post_json("/api/v1/auth/register", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_returns_same_id_number() {
    let state = create_test_state().await;
    let app = build_router(state);

    app.clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            &login_payload("jane@example.com", "Passw0rd!"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["id_number"], "123456789012");
    assert!(!json["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_differently_cased_email_succeeds() {
    let state = create_test_state().await;
    let app = build_router(state);

    app.clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            &login_payload("JANE@example.com", "Passw0rd!"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_and_unknown_email_indistinguishable() {
    let state = create_test_state().await;
    let app = build_router(state);

    app.clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/v1/auth/login",
            &login_payload("jane@example.com", "wrong-password"),
        ))
        .await
        .unwrap();

    let unknown_email = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            &login_payload("nobody@example.com", "Passw0rd!"),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical bodies: nothing may reveal which credential was wrong
    let body_a = body_bytes(wrong_password).await;
    let body_b = body_bytes(unknown_email).await;
    assert_eq!(body_a, body_b);

    let json: serde_json::Value = serde_json::from_slice(&body_a).unwrap();
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_rate_limit_trips() {
    let state = create_test_state_with_rate_limit(RateLimitConfig {
        max_attempts: 2,
        window_secs: 60,
    })
    .await;
    let app = build_router(state);

    app.clone()
        .oneshot(post_json(
            "/api/v1/auth/register",
            &register_payload("jane@example.com"),
        ))
        .await
        .unwrap();

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/auth/login",
                &login_payload("jane@example.com", "wrong-password"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let throttled = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            &login_payload("jane@example.com", "wrong-password"),
        ))
        .await
        .unwrap();

    assert_eq!(throttled.status(), StatusCode::TOO_MANY_REQUESTS);
    let json = body_json(throttled).await;
    assert_eq!(json["error"]["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn test_login_rate_limit_is_per_account() {
    let state = create_test_state_with_rate_limit(RateLimitConfig {
        max_attempts: 2,
        window_secs: 60,
    })
    .await;
    let app = build_router(state);

    for email in ["a@example.com", "b@example.com"] {
        app.clone()
            .oneshot(post_json("/api/v1/auth/register", &register_payload(email)))
            .await
            .unwrap();
    }

    // Exhaust the budget for one account
    for _ in 0..3 {
        app.clone()
            .oneshot(post_json(
                "/api/v1/auth/login",
                &login_payload("a@example.com", "wrong-password"),
            ))
            .await
            .unwrap();
    }

    // The other account is unaffected
    let response = app
        .oneshot(post_json(
            "/api/v1/auth/login",
            &login_payload("b@example.com", "Passw0rd!"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
