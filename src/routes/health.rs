use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Welcome message")),
    tag = "meta"
)]
#[axum::debug_handler]
pub async fn welcome() -> impl IntoResponse {
    Json(json!({ "message": "Hello, welcome to the Job Board API" }))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "meta"
)]
#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    });
    (StatusCode::OK, Json(body))
}
