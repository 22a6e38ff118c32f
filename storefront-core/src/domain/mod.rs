//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or external dependencies.

mod product;
pub mod result;

pub use product::{Product, ProductDraft, ProductPatch, Rating};
