//! # Request Audit Log
//!
//! Every request - static asset, API call, or rejected junk - logs one
//! line with method, client IP, path and response status.

use axum::extract::{ConnectInfo, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::net::SocketAddr;
use tracing::info;

/// Best-effort client address: first `X-Forwarded-For` entry when present,
/// otherwise the socket peer address.
pub fn client_ip(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware: logs method, IP, path and status for every request.
pub async fn audit_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let ip = client_ip(&request);

    let response = next.run(request).await;

    info!(
        %method,
        %ip,
        path,
        status = response.status().as_u16(),
        "request"
    );
    response
}
