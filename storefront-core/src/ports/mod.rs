//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod catalog;
mod product_store;

pub use catalog::CatalogProvider;
pub use product_store::{ProductStore, PruneCount};
