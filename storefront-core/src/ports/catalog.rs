//! Catalog provider port
//!
//! Defines the interface for talking to a remote product catalog service.

use crate::domain::result::Result;
use crate::domain::{Product, ProductDraft, ProductPatch};

/// Remote product catalog
///
/// Each method maps onto exactly one request/response cycle. Implementations
/// must not retry and must report every failure as an `Error` value rather
/// than returning a partial or fabricated `Product`.
pub trait CatalogProvider: Send + Sync {
    /// Provider name (e.g., "fakestore")
    fn name(&self) -> &str;

    /// Fetch the whole collection
    fn list_all(&self) -> Result<Vec<Product>>;

    /// Fetch at most `limit` products
    ///
    /// `limit` must be positive; the returned vector never exceeds it.
    fn list_limited(&self, limit: u32) -> Result<Vec<Product>>;

    /// Fetch one product, `Error::NotFound` if the service does not know the id
    fn get_by_id(&self, id: i64) -> Result<Product>;

    /// Create a product; the returned record carries the server-assigned id
    fn create(&self, draft: &ProductDraft) -> Result<Product>;

    /// Send partial fields; returns the server's merged representation
    fn update(&self, id: i64, patch: &ProductPatch) -> Result<Product>;

    /// Delete a product and return the server's echo of it
    ///
    /// The public demo catalog does not durably remove anything: a later
    /// `get_by_id` for the same id still succeeds. Callers must not treat a
    /// successful delete as proof that the record is gone.
    fn delete(&self, id: i64) -> Result<Product>;
}
