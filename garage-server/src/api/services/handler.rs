//! Service catalog handlers

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use shared::error::AppResult;
use shared::models::{Service, SortOrder};
use shared::response::Envelope;

use crate::api::MSG_FETCHED;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ServiceQuery {
    /// Text search term
    pub search: Option<String>,
    /// `asc` for ascending price, anything else descending
    pub order: Option<String>,
}

/// GET /services
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ServiceQuery>,
) -> AppResult<Envelope<Vec<Service>>> {
    let order = SortOrder::from_query(query.order.as_deref());
    let services = state
        .catalog
        .list_services(query.search.as_deref(), order)
        .await?;
    Ok(Envelope::ok(MSG_FETCHED, services))
}

/// GET /services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Envelope<Option<Service>>> {
    let service = state.catalog.get_service(&id).await?;
    Ok(Envelope::ok(MSG_FETCHED, service))
}
