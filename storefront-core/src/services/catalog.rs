//! Catalog service - remote product operations

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::result::Result;
use crate::domain::{Product, ProductDraft, ProductPatch};
use crate::ports::CatalogProvider;

/// Catalog service for talking to the remote product catalog
pub struct CatalogService {
    provider: Arc<dyn CatalogProvider>,
}

impl CatalogService {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn list_all(&self) -> Result<Vec<Product>> {
        let result = self.provider.list_all();
        match &result {
            Ok(products) => info!(count = products.len(), "fetched all products"),
            Err(e) => warn!(error = %e, "failed to fetch all products"),
        }
        result
    }

    pub fn list_limited(&self, limit: u32) -> Result<Vec<Product>> {
        let result = self.provider.list_limited(limit);
        match &result {
            Ok(products) => info!(limit, count = products.len(), "fetched limited products"),
            Err(e) => warn!(limit, error = %e, "failed to fetch limited products"),
        }
        result
    }

    pub fn get(&self, id: i64) -> Result<Product> {
        let result = self.provider.get_by_id(id);
        match &result {
            Ok(product) => info!(id, title = %product.title, "fetched product"),
            Err(e) => warn!(id, error = %e, "failed to fetch product"),
        }
        result
    }

    pub fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let result = self.provider.create(draft);
        match &result {
            Ok(product) => info!(id = product.id, "created product"),
            Err(e) => warn!(error = %e, "failed to create product"),
        }
        result
    }

    pub fn update(&self, id: i64, patch: &ProductPatch) -> Result<Product> {
        let result = self.provider.update(id, patch);
        match &result {
            Ok(_) => info!(id, "updated product"),
            Err(e) => warn!(id, error = %e, "failed to update product"),
        }
        result
    }

    /// Delete a product remotely; see `CatalogProvider::delete` for durability
    pub fn delete(&self, id: i64) -> Result<Product> {
        let result = self.provider.delete(id);
        match &result {
            Ok(_) => info!(id, "deleted product (not durable on the demo catalog)"),
            Err(e) => warn!(id, error = %e, "failed to delete product"),
        }
        result
    }
}
