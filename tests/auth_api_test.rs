mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{app, send, send_form, token_for};

#[tokio::test]
async fn register_login_and_me() {
    let app = app();

    let (status, user) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "email": "  Ann@Example.com ", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["email"], "ann@example.com");
    assert_eq!(user["role"], "Job Seeker");
    assert!(user.get("password_hash").is_none());

    let (status, token) = send(
        &app,
        Method::POST,
        "/token",
        None,
        Some(json!({ "email": "ann@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");
    assert_eq!(token["expires_in"], 1800);
    let access_token = token["access_token"].as_str().unwrap();

    let (status, me) = send(&app, Method::GET, "/me", Some(access_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], user["id"]);
}

#[tokio::test]
async fn wrong_password_is_an_authentication_error() {
    let app = app();
    token_for(&app, "bob@example.com", "Recruiter").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/login",
        None,
        Some(json!({ "email": "bob@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authentication_error");

    let (status, unknown) = send(
        &app,
        Method::POST,
        "/token",
        None,
        Some(json!({ "email": "ghost@example.com", "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown["message"], body["message"]);
}

#[tokio::test]
async fn duplicate_email_conflicts_regardless_of_case() {
    let app = app();
    token_for(&app, "dup@example.com", "Job Seeker").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/register",
        None,
        Some(json!({ "email": "DUP@example.com", "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");
}

#[tokio::test]
async fn malformed_registration_lists_fields() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "email": "not-an-email", "password": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["fields"], json!(["email", "password"]));
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "email": "x@example.com", "password": "pw", "role": "Admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn delete_self_then_token_is_refused() {
    let app = app();
    let token = token_for(&app, "gone@example.com", "Job Seeker").await;

    let (status, _) = send(&app, Method::DELETE, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::DELETE, "/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authorization_error");

    let (status, _) = send(&app, Method::GET, "/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn missing_or_garbage_token_is_unauthorized() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authorization_error");

    let (status, _) = send(&app, Method::GET, "/me", Some("not.a.jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_accepts_a_password_grant_form() {
    let app = app();
    token_for(&app, "form@example.com", "Recruiter").await;

    let (status, token) = send_form(&app, "/token", "username=Form%40example.com&password=s3cret").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");
    let access_token = token["access_token"].as_str().unwrap();
    let (status, me) = send(&app, Method::GET, "/me", Some(access_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "form@example.com");
    assert_eq!(me["recruiter_profile"], serde_json::Value::Null);

    let (status, body) = send_form(&app, "/users/login", "username=form%40example.com&password=nope").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "authentication_error");

    let (status, body) = send_form(&app, "/token", "username=form%40example.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
}
