//! Integration tests for login, verification, refresh, and password change.

mod helpers;

use http::{Request, StatusCode};
use serde_json::json;

use helpers::{ADMIN_EMAIL, PASSWORD, TestApp};
use workforce_auth::jwt::JwtEncoder;
use workforce_core::types::AccountId;
use workforce_database::repositories::AccountRepository;
use workforce_entity::account::{AccountIdentity, Role};

#[tokio::test]
async fn test_login_success_hides_password_hash() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    let data = &response.body["data"];
    assert!(data["accessToken"].is_string());
    assert!(data["refreshToken"].is_string());
    assert_eq!(data["user"]["email"], ADMIN_EMAIL);
    assert_eq!(data["user"]["role"], "admin");
    assert!(data["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new().await;

    let wrong = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": "Not-the-password-1" })),
            None,
        )
        .await;
    let unknown = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ghost@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.error_code(), "INVALID_CREDENTIALS");
    assert_eq!(wrong.status, unknown.status);
    assert_eq!(wrong.body, unknown.body);
}

#[tokio::test]
async fn test_verify_returns_identity() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let response = app
        .request("POST", "/api/auth/verify", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], ADMIN_EMAIL);
    assert!(response.body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_missing_or_non_bearer_header() {
    let app = TestApp::new().await;

    let response = app.request("POST", "/api/auth/verify", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MISSING_CREDENTIALS");
    assert_eq!(response.body["success"], false);

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/verify")
        .header("Authorization", "Basic YWRtaW46cGFzcw==")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "MISSING_CREDENTIALS");
}

#[tokio::test]
async fn test_garbage_and_foreign_tokens_are_invalid() {
    let app = TestApp::new().await;

    let response = app
        .request("POST", "/api/auth/verify", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");

    let account = app
        .state
        .repos
        .accounts
        .find_by_email(ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();
    let mut other = helpers::test_config().auth;
    other.jwt_secret = "a-completely-different-key".into();
    let forged = JwtEncoder::new(&other)
        .generate_token_pair(&account.identity())
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/verify",
            None,
            Some(&forged.access_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_token_for_missing_account_is_rejected() {
    let app = TestApp::new().await;
    let ghost = AccountIdentity {
        id: AccountId::new(),
        email: "ghost@example.com".into(),
        name: "Ghost".into(),
        role: Role::Admin,
        profile_image: None,
    };
    let pair = JwtEncoder::new(&helpers::test_config().auth)
        .generate_token_pair(&ghost)
        .unwrap();

    let response = app
        .request("POST", "/api/auth/verify", None, Some(&pair.access_token))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNKNOWN_ACCOUNT");

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": pair.refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNKNOWN_ACCOUNT");
}

#[tokio::test]
async fn test_refresh_token_flow() {
    let app = TestApp::new().await;
    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": ADMIN_EMAIL, "password": PASSWORD })),
            None,
        )
        .await;
    let refresh_token = login.body["data"]["refreshToken"].as_str().unwrap();
    let access_token = login.body["data"]["accessToken"].as_str().unwrap();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["accessToken"].is_string());

    // An access token is not accepted where a refresh token is expected
    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(json!({ "refreshToken": access_token })),
            None,
        )
        .await;
    assert_eq!(response.error_code(), "INVALID_TOKEN");

    // ...nor the other way round
    let response = app
        .request("POST", "/api/auth/verify", None, Some(refresh_token))
        .await;
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_malformed_login_body_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .raw_request("POST", "/api/auth/login", "{not json".into(), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "", "password": "" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;
    let next = "Tm4$wQz8!kNe3Y";

    let response = app
        .request(
            "PUT",
            "/api/setting/change-password",
            Some(json!({ "oldPassword": "wrong-Password-1", "newPassword": next })),
            Some(&token),
        )
        .await;
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");

    let response = app
        .request(
            "PUT",
            "/api/setting/change-password",
            Some(json!({ "oldPassword": PASSWORD, "newPassword": next })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    app.login(ADMIN_EMAIL, next).await;
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
