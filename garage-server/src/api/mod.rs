//! HTTP surface
//!
//! | Method | Path | Auth |
//! |--------|------|------|
//! | GET | `/`, `/health` | - |
//! | GET | `/services`, `/services/{id}` | - |
//! | POST, GET | `/orders` | bearer |
//! | GET | `/orders/{id}` | - |
//! | PATCH, DELETE | `/orders/{id}` | bearer |
//! | POST | `/jwt` | - |

pub mod extract;
pub mod health;
pub mod orders;
pub mod services;
pub mod token;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::middleware;
use crate::state::AppState;

pub use extract::ApiJson;

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Messages shared by the data endpoints
pub(crate) const MSG_FETCHED: &str = "Successfully got the data";

/// UUID v4 request ids
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// All routes, without global middleware or state
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(services::router())
        .merge(orders::router(state))
        .merge(token::router())
}

/// Fully configured application: routes, middleware and state
pub fn build_app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router(&state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // Request logging, sees the request id set below
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
        .layer(PropagateRequestIdLayer::new(request_id))
        .with_state(state)
}
