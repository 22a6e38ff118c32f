//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod catalog;
pub mod demo;
mod inventory;

pub use catalog::CatalogService;
pub use demo::{DemoReport, DemoScript, DemoService, DemoStep, StepOutcome};
pub use inventory::{InventoryService, InventorySummary, PruneResult};
