use crate::common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_auth_routes_are_rate_limited() {
    let mut config = common::test_config();
    config.rate_limit_per_minute = 2;
    let app = common::test_app_with(config, common::unreachable_pool());
    let body = json!({ "email": "nobody@example.com", "password": "password123" });

    let mut statuses = Vec::new();
    for _ in 0..3 {
        let (status, _) = app
            .send("POST", "/api/v1/auth/login", None, Some(body.clone()))
            .await;
        statuses.push(status);
    }

    assert_eq!(statuses[0], StatusCode::UNAUTHORIZED);
    assert_eq!(statuses[1], StatusCode::UNAUTHORIZED);
    assert_eq!(statuses[2], StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_session_routes_are_not_rate_limited() {
    let mut config = common::test_config();
    config.rate_limit_per_minute = 1;
    let app = common::test_app_with(config, common::unreachable_pool());

    for _ in 0..3 {
        let (status, _) = app.send("GET", "/api/v1/auth/me", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let app = common::test_app();

    let response = app
        .router
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
