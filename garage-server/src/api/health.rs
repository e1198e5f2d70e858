//! Liveness endpoints

use axum::{Json, Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

pub async fn root() -> &'static str {
    "Server is Running........"
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "garage-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
