//! Document store
//!
//! Collections hold schemaless JSON documents keyed by UUID. The
//! [`DocumentStore`] trait is the seam between the managers and the driver:
//! [`PgStore`] keeps documents in JSONB tables, [`MemoryStore`] keeps them in
//! process for development and tests.

pub mod filter;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::StoreResult;

pub use filter::{Filter, Sort, SortDirection, TextQuery};
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Named document collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Orders,
}

impl Collection {
    /// Table / collection name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Orders => "orders",
        }
    }

    /// Fields covered by the text index
    pub fn text_fields(&self) -> &'static [&'static str] {
        match self {
            Self::Services => &["title", "description"],
            Self::Orders => &[],
        }
    }
}

/// A stored document: its key plus the JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Uuid,
    pub body: Map<String, Value>,
}

impl Document {
    /// Deserialize into a model, exposing the key as `_id`
    pub fn into_model<T: DeserializeOwned>(self) -> StoreResult<T> {
        let mut body = self.body;
        body.insert("_id".to_string(), Value::String(self.id.to_string()));
        Ok(serde_json::from_value(Value::Object(body))?)
    }
}

/// Counts reported by a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Driver seam for schemaless collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document; returns the generated key, if the driver reported one
    async fn insert_one(
        &self,
        collection: Collection,
        body: Map<String, Value>,
    ) -> StoreResult<Option<Uuid>>;

    /// All documents matching `filter`, optionally ordered by one field
    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
        sort: Option<&Sort>,
    ) -> StoreResult<Vec<Document>>;

    async fn find_one(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Document>>;

    /// Set one top-level field of one document
    async fn set_field(
        &self,
        collection: Collection,
        id: Uuid,
        field: &str,
        value: Value,
    ) -> StoreResult<UpdateOutcome>;

    /// Delete by key; returns the number of documents removed
    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<u64>;

    async fn count(&self, collection: Collection) -> StoreResult<u64>;
}

/// Store handle shared by every component
pub type SharedStore = Arc<dyn DocumentStore>;

/// Open the configured store (PostgreSQL runs migrations on connect)
pub async fn connect(config: &DatabaseConfig, max_connections: u32) -> StoreResult<SharedStore> {
    match config {
        DatabaseConfig::Memory => {
            tracing::warn!("Using in-memory document store, data is lost on shutdown");
            Ok(Arc::new(MemoryStore::new()))
        }
        other => {
            let store = PgStore::connect(postgres::connect_options(other)?, max_connections).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Parse a path identifier into a document key
pub fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_format(format!("Malformed identifier: {raw}")))
}
