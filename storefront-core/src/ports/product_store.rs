//! Product store port - local persistence abstraction

use std::path::Path;

use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::{Product, ProductDraft};

/// Durable ordered sequence of products
///
/// Every mutation is a full load -> transform -> save cycle. There is no
/// locking: one writer at a time, last write wins.
pub trait ProductStore: Send + Sync {
    /// Location of the backing data
    fn path(&self) -> &Path;

    /// Whether the backing data exists yet
    fn exists(&self) -> bool;

    /// Read every stored product, in order
    fn load(&self) -> Result<Vec<Product>>;

    /// Replace the stored sequence with `products`
    ///
    /// This starts a new id numbering epoch: the next `append` continues
    /// from the highest id in `products`.
    fn save(&self, products: &[Product]) -> Result<()>;

    /// Append a product built from `draft` with a freshly assigned id
    fn append(&self, draft: &ProductDraft) -> Result<Product>;

    /// Drop every product priced above `threshold`
    fn delete_where_price_above(&self, threshold: Decimal) -> Result<PruneCount>;
}

/// Outcome of a price prune, counted from the rewritten sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PruneCount {
    pub removed: usize,
    pub kept: usize,
}
