//! Catalog reader
//!
//! Read-only access to the `services` collection, plus the startup import
//! that fills an empty catalog from a JSON file.

use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value};
use shared::error::AppResult;
use shared::models::{Service, SortOrder};

use crate::db::{Collection, DocumentStore, Filter, SharedStore, Sort, SortDirection, parse_id};

/// Field services are ordered by
const PRICE_FIELD: &str = "price";

#[derive(Clone)]
pub struct CatalogReader {
    store: SharedStore,
}

impl CatalogReader {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Services matching `search` (all when absent or empty), ordered by price
    pub async fn list_services(
        &self,
        search: Option<&str>,
        order: SortOrder,
    ) -> AppResult<Vec<Service>> {
        let direction = match order {
            SortOrder::Asc => SortDirection::Asc,
            SortOrder::Desc => SortDirection::Desc,
        };
        let docs = self
            .store
            .find(
                Collection::Services,
                &Filter::search(search),
                Some(&Sort::new(PRICE_FIELD, direction)),
            )
            .await?;

        let services = docs
            .into_iter()
            .map(|doc| doc.into_model::<Service>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(services)
    }

    /// One service by id; `None` when absent
    pub async fn get_service(&self, id: &str) -> AppResult<Option<Service>> {
        let id = parse_id(id)?;
        match self.store.find_one(Collection::Services, id).await? {
            Some(doc) => Ok(Some(doc.into_model()?)),
            None => Ok(None),
        }
    }
}

/// Import services from a JSON array file when the catalog is empty
///
/// Returns how many services were inserted. `_id` keys in the file are
/// ignored; every service gets a fresh key.
pub async fn seed_catalog(store: &dyn DocumentStore, path: &Path) -> anyhow::Result<usize> {
    if store.count(Collection::Services).await? > 0 {
        tracing::debug!("Catalog already populated, skipping seed");
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading catalog seed {}", path.display()))?;
    let services: Vec<Map<String, Value>> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing catalog seed {}", path.display()))?;

    let mut inserted = 0;
    for mut service in services {
        service.remove("_id");
        if store.insert_one(Collection::Services, service).await?.is_some() {
            inserted += 1;
        }
    }

    tracing::info!(count = inserted, path = %path.display(), "Catalog seeded");
    Ok(inserted)
}
