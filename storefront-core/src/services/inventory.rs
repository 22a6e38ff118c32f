//! Inventory service - local product store use cases

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Product, ProductDraft};
use crate::ports::ProductStore;

/// Inventory service over the local product store
pub struct InventoryService {
    store: Arc<dyn ProductStore>,
}

impl InventoryService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub fn store_path(&self) -> &Path {
        self.store.path()
    }

    /// Overwrite the store with `products`
    pub fn snapshot(&self, products: &[Product]) -> Result<()> {
        self.store.save(products)
    }

    pub fn list(&self) -> Result<Vec<Product>> {
        self.store.load()
    }

    pub fn add(&self, draft: &ProductDraft) -> Result<Product> {
        self.store.append(draft)
    }

    /// Remove every product priced above `threshold`
    pub fn prune_above(&self, threshold: Decimal) -> Result<PruneResult> {
        let count = self.store.delete_where_price_above(threshold)?;
        Ok(PruneResult {
            threshold,
            removed: count.removed,
            kept: count.kept,
        })
    }

    /// Count and price statistics for the stored products
    pub fn summary(&self) -> Result<InventorySummary> {
        let products = self.store.load()?;
        Ok(InventorySummary::from_products(&products))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PruneResult {
    pub threshold: Decimal,
    pub removed: usize,
    pub kept: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventorySummary {
    pub count: usize,
    pub total_price: Decimal,
    pub average_price: Option<Decimal>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl InventorySummary {
    pub fn from_products(products: &[Product]) -> Self {
        let total_price: Decimal = products.iter().map(|p| p.price).sum();
        let average_price = if products.is_empty() {
            None
        } else {
            Some((total_price / Decimal::from(products.len())).round_dp(2))
        };

        Self {
            count: products.len(),
            total_price,
            average_price,
            min_price: products.iter().map(|p| p.price).min(),
            max_price: products.iter().map(|p| p.price).max(),
        }
    }
}
