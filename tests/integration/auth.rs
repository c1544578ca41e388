use crate::common;

use axum::http::StatusCode;
use magicstream::domain::users::{Role, UserRepository};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};

fn register_body(email: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": common::TEST_PASSWORD
    })
}

fn tokens(body: &Value) -> (String, String) {
    let attributes = &body["data"]["attributes"];
    let tokens = if attributes.get("tokens").is_some() {
        &attributes["tokens"]
    } else {
        attributes
    };
    (
        tokens["accessToken"].as_str().unwrap().to_string(),
        tokens["refreshToken"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_register_returns_user_and_tokens() {
    let app = common::test_app();

    let (status, body) = app
        .send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "sessions");
    let attributes = &body["data"]["attributes"];
    assert_eq!(attributes["user"]["email"], "ada@example.com");
    assert_eq!(attributes["user"]["role"], "USER");
    assert!(attributes["user"].get("password_hash").is_none());
    assert_eq!(attributes["tokens"]["tokenType"], "Bearer");
    assert_eq!(attributes["tokens"]["expiresIn"], 900);

    let (_, refresh_token) = tokens(&body);
    assert!(app.refresh_tokens.find_by_token(&refresh_token).is_some());
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let app = common::test_app();
    app.send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;

    let (status, body) = app
        .send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"][0]["status"], "409");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = common::test_app();

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({
                "first_name": "A",
                "last_name": "Lovelace",
                "email": "not-an-email",
                "password": "123"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let pointers: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|e| e["source"]["pointer"].as_str())
        .collect();
    assert_eq!(pointers, ["/email", "/first_name", "/password"]);
    assert!(app.users.find_by_email("not-an-email").await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = common::test_app();

    let (status, _) = app
        .send("POST", "/api/v1/auth/register", None, Some(json!({ "email": 42 })))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_success_and_failures() {
    let app = common::test_app();
    app.create_user("ada@example.com", Role::User).await;

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": common::TEST_PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["user"]["email"], "ada@example.com");

    let (wrong_password, wrong_body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": "wrong-password" })),
        )
        .await;
    let (unknown_email, unknown_body) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "bob@example.com", "password": common::TEST_PASSWORD })),
        )
        .await;

    assert_eq!(wrong_password, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["errors"][0]["detail"], "Invalid email or password");
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_refresh_rotates_and_rejects_reuse() {
    let app = common::test_app();
    let (_, body) = app
        .send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;
    let (_, original) = tokens(&body);

    let (status, body) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": original })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["type"], "tokens");
    let (access, rotated) = tokens(&body);
    assert_ne!(rotated, original);

    let (me_status, _) = app.send("GET", "/api/v1/auth/me", Some(&access), None).await;
    assert_eq!(me_status, StatusCode::OK);

    let (reuse_status, reuse_body) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": original })),
        )
        .await;
    assert_eq!(reuse_status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        reuse_body["errors"][0]["detail"],
        "Invalid or expired refresh token"
    );
}

#[tokio::test]
async fn test_refresh_with_expired_record_revokes_it() {
    let app = common::test_app();
    let (_, body) = app
        .send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;
    let (_, refresh_token) = tokens(&body);
    app.refresh_tokens.set_expires_at(
        &refresh_token,
        OffsetDateTime::now_utc() - Duration::minutes(1),
    );

    let (status, _) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh_token })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(app.refresh_tokens.find_by_token(&refresh_token).unwrap().revoked);
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = common::test_app();
    let (_, body) = app
        .send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;
    let (access, _) = tokens(&body);

    let (status, _) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": access })),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_store_failure_is_server_error() {
    let app = common::test_app();
    let (_, body) = app
        .send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;
    let (_, refresh_token) = tokens(&body);
    app.refresh_tokens.fail_writes(true);

    let (status, _) = app
        .send(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(json!({ "refresh_token": refresh_token })),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_logout_revokes_every_session() {
    let app = common::test_app();
    let (_, first) = app
        .send("POST", "/api/v1/auth/register", None, Some(register_body("ada@example.com")))
        .await;
    let (_, second) = app
        .send(
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ada@example.com", "password": common::TEST_PASSWORD })),
        )
        .await;
    let (access, first_refresh) = tokens(&first);
    let (_, second_refresh) = tokens(&second);

    let (status, body) = app.send("POST", "/api/v1/auth/logout", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["revoked"], 2);

    for refresh_token in [first_refresh, second_refresh] {
        let (status, _) = app
            .send(
                "POST",
                "/api/v1/auth/refresh",
                None,
                Some(json!({ "refresh_token": refresh_token })),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Logging out again is harmless
    let (status, body) = app.send("POST", "/api/v1/auth/logout", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["revoked"], 0);
}

#[tokio::test]
async fn test_me_requires_valid_access_token() {
    let app = common::test_app();
    let user = app.create_user("ada@example.com", Role::User).await;
    let access = app.access_token_for(user.id).await;

    let (status, body) = app.send("GET", "/api/v1/auth/me", Some(&access), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], user.id.to_string());

    let (status, _) = app.send("GET", "/api/v1/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send("GET", "/api/v1/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_for_deleted_user_is_not_found() {
    let app = common::test_app();
    let user = app.create_user("ada@example.com", Role::User).await;
    let access = app.access_token_for(user.id).await;
    app.users.remove(user.id);

    let (status, _) = app.send("GET", "/api/v1/auth/me", Some(&access), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
