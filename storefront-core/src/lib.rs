//! Storefront Core - product catalog client and local product store
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Core entities (Product, ProductDraft, ProductPatch) and errors
//! - **ports**: Trait definitions for external dependencies (CatalogProvider, ProductStore)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (Fake Store HTTP client, JSON file store)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use adapters::fakestore::FakeStoreClient;
use adapters::json_file::JsonFileStore;
use config::Config;
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, OperationResult};
pub use domain::{Product, ProductDraft, ProductPatch, Rating};

/// Main context for Storefront operations
///
/// Holds the configuration, the catalog client, the local store, and the
/// services built on them.
pub struct StorefrontContext {
    pub config: Config,
    pub catalog: Arc<FakeStoreClient>,
    pub store: Arc<JsonFileStore>,
    pub catalog_service: CatalogService,
    pub inventory_service: InventoryService,
    pub demo_service: DemoService,
}

impl StorefrontContext {
    /// Create a new Storefront context from a loaded configuration
    pub fn new(config: Config) -> Result<Self> {
        let catalog = Arc::new(
            FakeStoreClient::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
                .context("Failed to create catalog client")?,
        );
        let store = Arc::new(JsonFileStore::new(config.store_path.clone()));

        let catalog_service = CatalogService::new(catalog.clone());
        let inventory_service = InventoryService::new(store.clone());
        let demo_service = DemoService::new(catalog.clone(), store.clone());

        Ok(Self {
            config,
            catalog,
            store,
            catalog_service,
            inventory_service,
            demo_service,
        })
    }

    /// Walkthrough parameters from config
    pub fn demo_script(&self) -> DemoScript {
        DemoScript {
            limit: self.config.demo_limit,
            price_threshold: self.config.demo_threshold,
            ..Default::default()
        }
    }
}
