//! Order manager
//!
//! Create, list, fetch, update-status and delete against the `orders`
//! collection. Listing is scoped to the verified identity.

use serde_json::Value;
use shared::error::{AppError, AppResult};
use shared::models::{InsertResult, NewOrder, Order, StatusUpdate, UpdateResult};
use validator::Validate;

use crate::auth::TokenClaims;
use crate::db::{Collection, Filter, SharedStore, parse_id};
use crate::security_log;

const EMAIL_FIELD: &str = "email";
const STATUS_FIELD: &str = "status";

/// How a delete request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// The order existed but nothing was removed (deleted concurrently)
    NotDeleted,
}

/// Reject a listing whose `email` filter is not the caller's own
///
/// One side present and the other absent is a mismatch too.
pub fn authorize_owner(claims: &TokenClaims, email: Option<&str>) -> AppResult<()> {
    if claims.email() == email {
        return Ok(());
    }
    security_log!(
        "order_list_forbidden",
        claimed = claims.email().unwrap_or("<none>"),
        requested = email.unwrap_or("<none>")
    );
    Err(AppError::forbidden("Forbidden access"))
}

#[derive(Clone)]
pub struct OrderManager {
    store: SharedStore,
}

impl OrderManager {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Validate and persist a new order
    ///
    /// `None` when the store did not report a generated id.
    pub async fn create_order(&self, order: NewOrder) -> AppResult<Option<InsertResult>> {
        order.validate()?;

        let inserted = self
            .store
            .insert_one(Collection::Orders, order.into_document())
            .await?;

        Ok(inserted.map(|id| {
            tracing::info!(order_id = %id, "Order created");
            InsertResult {
                acknowledged: true,
                inserted_id: id.to_string(),
            }
        }))
    }

    /// Orders visible to `claims`, filtered by `email` when given
    pub async fn list_orders(
        &self,
        claims: &TokenClaims,
        email: Option<&str>,
    ) -> AppResult<Vec<Order>> {
        authorize_owner(claims, email)?;

        let filter = match email {
            Some(email) => Filter::field_equals(EMAIL_FIELD, email),
            None => Filter::All,
        };
        let orders = self
            .store
            .find(Collection::Orders, &filter, None)
            .await?
            .into_iter()
            .map(|doc| doc.into_model::<Order>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(orders)
    }

    pub async fn get_order(&self, id: &str) -> AppResult<Option<Order>> {
        let id = parse_id(id)?;
        match self.store.find_one(Collection::Orders, id).await? {
            Some(doc) => Ok(Some(doc.into_model()?)),
            None => Ok(None),
        }
    }

    pub async fn update_order_status(&self, id: &str, update: StatusUpdate) -> AppResult<UpdateResult> {
        let id = parse_id(id)?;
        update.validate()?;

        let outcome = self
            .store
            .set_field(
                Collection::Orders,
                id,
                STATUS_FIELD,
                Value::String(update.status),
            )
            .await?;

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: outcome.matched,
            modified_count: outcome.modified,
        })
    }

    /// Fetch-then-delete
    pub async fn delete_order(&self, id: &str) -> AppResult<DeleteOutcome> {
        let id = parse_id(id)?;
        if self.store.find_one(Collection::Orders, id).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        match self.store.delete_one(Collection::Orders, id).await? {
            0 => {
                tracing::warn!(order_id = %id, "Order vanished before delete");
                Ok(DeleteOutcome::NotDeleted)
            }
            _ => {
                tracing::info!(order_id = %id, "Order deleted");
                Ok(DeleteOutcome::Deleted)
            }
        }
    }
}
