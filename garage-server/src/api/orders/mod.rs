//! Order API
//!
//! Everything except `GET /orders/{id}` runs behind the access guard.

mod handler;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{patch, post},
};

use crate::auth::require_auth;
use crate::state::AppState;

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new().nest("/orders", order_routes(state))
}

fn order_routes(state: &AppState) -> Router<AppState> {
    let guard = from_fn_with_state(state.clone(), require_auth);

    Router::new()
        .route(
            "/",
            post(handler::create)
                .get(handler::list)
                .route_layer(guard.clone()),
        )
        .route(
            "/{id}",
            patch(handler::update_status)
                .delete(handler::delete)
                .route_layer(guard)
                // Added after the guard: public
                .get(handler::get_by_id),
        )
}
