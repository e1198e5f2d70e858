//! Order handlers

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use shared::error::{AppResult, ErrorCode};
use shared::models::{NewOrder, Order, StatusUpdate};
use shared::response::Envelope;

use crate::api::{ApiJson, MSG_FETCHED};
use crate::auth::TokenClaims;
use crate::orders::DeleteOutcome;
use crate::state::AppState;

const MSG_PLACED: &str = "Successfully placed order";
const MSG_UPDATED: &str = "Successfully updated the order";
const MSG_DELETED: &str = "Successfully deleted the order";

#[derive(Debug, Default, Deserialize)]
pub struct OrderQuery {
    pub email: Option<String>,
}

/// POST /orders
pub async fn create(
    State(state): State<AppState>,
    ApiJson(order): ApiJson<NewOrder>,
) -> AppResult<Response> {
    let response = match state.orders.create_order(order).await? {
        Some(result) => Envelope::ok(MSG_PLACED, result).into_response(),
        None => Envelope::failure(ErrorCode::OrderCreateFailed.message()).into_response(),
    };
    Ok(response)
}

/// GET /orders?email=
pub async fn list(
    State(state): State<AppState>,
    claims: TokenClaims,
    Query(query): Query<OrderQuery>,
) -> AppResult<Envelope<Vec<Order>>> {
    let orders = state
        .orders
        .list_orders(&claims, query.email.as_deref())
        .await?;
    Ok(Envelope::ok(MSG_FETCHED, orders))
}

/// GET /orders/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Envelope<Option<Order>>> {
    let order = state.orders.get_order(&id).await?;
    Ok(Envelope::ok(MSG_FETCHED, order))
}

/// PATCH /orders/{id}
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<StatusUpdate>,
) -> AppResult<Response> {
    let result = state.orders.update_order_status(&id, update).await?;
    let response = if result.matched_count == 0 {
        Envelope::failure(ErrorCode::OrderNotFound.message()).into_response()
    } else {
        Envelope::ok(MSG_UPDATED, result).into_response()
    };
    Ok(response)
}

/// DELETE /orders/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Envelope<()>> {
    let envelope = match state.orders.delete_order(&id).await? {
        DeleteOutcome::Deleted => Envelope::done(MSG_DELETED),
        DeleteOutcome::NotFound => Envelope::failure(ErrorCode::OrderNotFound.message()),
        DeleteOutcome::NotDeleted => Envelope::failure(ErrorCode::OrderDeleteFailed.message()),
    };
    Ok(envelope)
}
