#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jobboard_backend::{
    config::{Config, LogFormat, StorageBackend},
    router::build_router,
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        storage_backend: StorageBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        jwt_secret: "test_secret_key".to_string(),
        access_token_expire_minutes: 30,
        api_rps: 10_000,
        log_format: LogFormat::Text,
    }
}

pub fn app() -> Router {
    build_router(AppState::in_memory(Arc::new(test_config())))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

pub async fn send_form(app: &Router, uri: &str, form: &str) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

pub async fn token_for(app: &Router, email: &str, role: &str) -> String {
    let (status, _) = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "email": email, "password": "s3cret", "role": role })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register {}", email);

    let (status, body) = send(
        app,
        Method::POST,
        "/token",
        None,
        Some(json!({ "email": email, "password": "s3cret" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login {}", email);
    body["access_token"].as_str().expect("token").to_string()
}

pub async fn recruiter_token(app: &Router) -> String {
    token_for(app, "recruiter@example.com", "Recruiter").await
}

pub async fn seeker_token(app: &Router) -> String {
    token_for(app, "seeker@example.com", "Job Seeker").await
}

pub fn company_body(email: &str) -> JsonValue {
    json!({
        "email": email,
        "name": "Acme Analytics",
        "industry": "Information Technology",
        "location": "Bengaluru",
        "description": "Data tooling",
        "website": "https://acme.example.com"
    })
}

pub fn listing_body(company_id: i64, title: &str, location: &str, employment_type: &str) -> JsonValue {
    json!({
        "company_id": company_id,
        "title": title,
        "description": "Build things",
        "location": location,
        "salary_range": "9L-15L",
        "employment_type": employment_type,
        "application_deadline": "2030-01-31",
        "status": "Still accepting"
    })
}

pub fn recruiter_body(company_id: i64) -> JsonValue {
    json!({
        "first_name": "Rita",
        "last_name": "Rao",
        "company_id": company_id,
        "position": "Talent lead",
        "phone_number": "555-0101"
    })
}

pub fn seeker_body() -> JsonValue {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "desired_job_title": "Backend Engineer",
        "phone_number": "555-0100",
        "location": "London",
        "current_salary": 1200000
    })
}

pub async fn create(app: &Router, uri: &str, token: &str, body: JsonValue) -> JsonValue {
    let (status, created) = send(app, Method::POST, uri, Some(token), Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "POST {} -> {}", uri, created);
    created
}

pub fn id_of(value: &JsonValue) -> i64 {
    value["id"].as_i64().expect("id")
}
