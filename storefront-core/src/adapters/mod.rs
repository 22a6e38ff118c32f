//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - Fake Store HTTP client for the CatalogProvider port
//! - JSON file on the local filesystem for the ProductStore port
//! - Mock catalog HTTP server for tests

pub mod fakestore;
pub mod json_file;

#[cfg(test)]
pub mod fakestore_mock;
