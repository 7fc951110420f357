use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, latency_ms, "request finished");
    } else {
        tracing::info!(%method, %path, status, latency_ms, "request finished");
    }
    response
}
