//! Application state

use std::sync::Arc;

use crate::auth::TokenService;
use crate::catalog::{self, CatalogReader};
use crate::config::Config;
use crate::db::{self, SharedStore};
use crate::orders::OrderManager;

/// Shared application state, cloned into every request
#[derive(Clone)]
pub struct AppState {
    /// Document store handle (one per process)
    pub store: SharedStore,
    /// Bearer token signing and verification
    pub tokens: Arc<TokenService>,
    pub catalog: CatalogReader,
    pub orders: OrderManager,
}

impl AppState {
    /// Wire the components around an already opened store
    pub fn new(store: SharedStore, tokens: TokenService) -> Self {
        Self {
            catalog: CatalogReader::new(store.clone()),
            orders: OrderManager::new(store.clone()),
            tokens: Arc::new(tokens),
            store,
        }
    }

    /// Open the configured store, seed the catalog when asked, build the state
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let store = db::connect(&config.database, config.db_max_connections).await?;

        if let Some(path) = &config.catalog_seed_path {
            catalog::seed_catalog(&*store, path).await?;
        }

        Ok(Self::new(
            store,
            TokenService::new(&config.access_token_secret),
        ))
    }
}
