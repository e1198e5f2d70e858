//! Request logging middleware

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

use crate::api::REQUEST_ID_HEADER;
use crate::auth::Identity;

/// Log each request with its id, method, matched path, status, latency and
/// the authenticated email (when the access guard ran).
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let user = response
        .extensions()
        .get::<Identity>()
        .and_then(|identity| identity.email.clone());

    if response.status().is_client_error() || response.status().is_server_error() {
        warn!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            user = ?user,
            "Request rejected"
        );
    } else {
        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status,
            latency_ms,
            user = ?user,
            "Request completed"
        );
    }

    response
}
