//! Demo service - the fixed catalog walkthrough
//!
//! Runs every catalog verb once, then seeds the local store from the limited
//! listing and mutates it twice. A failing step never aborts the run: it is
//! recorded in the report and the script moves on. Only the local store steps
//! depend on an earlier result, and they are skipped when it is missing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{info, warn};

use crate::domain::result::Result;
use crate::domain::{Product, ProductDraft, ProductPatch};
use crate::ports::{CatalogProvider, ProductStore};
use crate::services::{CatalogService, InventoryService};

/// Parameters of the walkthrough
#[derive(Debug, Clone)]
pub struct DemoScript {
    pub limit: u32,
    pub create_draft: ProductDraft,
    pub get_id: i64,
    pub update_id: i64,
    pub update_patch: ProductPatch,
    pub delete_id: i64,
    pub local_draft: ProductDraft,
    pub price_threshold: Decimal,
}

impl Default for DemoScript {
    fn default() -> Self {
        Self {
            limit: 5,
            create_draft: ProductDraft::new("Test API Product", Decimal::new(135, 1))
                .with_description("Product description for the API exercise.")
                .with_image("https://i.pravatar.cc")
                .with_category("electronic"),
            get_id: 3,
            update_id: 7,
            update_patch: ProductPatch {
                title: Some("MODIFIED title".to_string()),
                price: Some(Decimal::new(255, 1)),
                ..Default::default()
            },
            delete_id: 10,
            local_draft: ProductDraft::new("Locally Added Product", Decimal::new(9999, 2))
                .with_description("This product was added directly to the JSON file.")
                .with_category("local"),
            price_threshold: Decimal::new(20, 0),
        }
    }
}

/// Outcome of one walkthrough step
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StepOutcome {
    Succeeded {
        detail: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<JsonValue>,
    },
    Failed {
        error: String,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoStep {
    pub name: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub steps: Vec<DemoStep>,
}

impl DemoReport {
    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Succeeded { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Skipped { .. }))
    }

    /// Look a step up by name
    pub fn step(&self, name: &str) -> Option<&DemoStep> {
        self.steps.iter().find(|s| s.name == name)
    }

    fn count(&self, pred: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(&s.outcome)).count()
    }
}

/// Demo service running the walkthrough
pub struct DemoService {
    catalog: CatalogService,
    inventory: InventoryService,
}

impl DemoService {
    pub fn new(provider: Arc<dyn CatalogProvider>, store: Arc<dyn ProductStore>) -> Self {
        Self {
            catalog: CatalogService::new(provider),
            inventory: InventoryService::new(store),
        }
    }

    /// Run every step in order and report each outcome
    pub fn run(&self, script: &DemoScript) -> DemoReport {
        let started_at = Utc::now();
        let mut steps = Vec::new();

        let all = self.catalog.list_all();
        steps.push(record("list_all", &all, |products| {
            (format!("{} products fetched", products.len()), None)
        }));

        let limited = self.catalog.list_limited(script.limit);
        steps.push(record("list_limited", &limited, |products| {
            (
                format!("{} products fetched (limit {})", products.len(), script.limit),
                to_data(products),
            )
        }));

        let created = self.catalog.create(&script.create_draft);
        steps.push(record("create", &created, |product| {
            (format!("created product with id {}", product.id), to_data(product))
        }));

        let fetched = self.catalog.get(script.get_id);
        steps.push(record("get_by_id", &fetched, |product| {
            (format!("found product {}", product.id), to_data(product))
        }));

        let updated = self.catalog.update(script.update_id, &script.update_patch);
        steps.push(record("update", &updated, |product| {
            (format!("modified product {}", product.id), to_data(product))
        }));

        let deleted = self.catalog.delete(script.delete_id);
        steps.push(record("delete", &deleted, |product| {
            (
                format!(
                    "product {} deleted (the demo catalog does not persist deletes)",
                    product.id
                ),
                to_data(product),
            )
        }));

        match &limited {
            Ok(products) => self.run_local_steps(script, products, &mut steps),
            Err(_) => {
                let reason = "limited product listing failed, nothing to save".to_string();
                warn!("skipping local store steps: {}", reason);
                for name in ["save_local", "append_local", "prune_local"] {
                    steps.push(DemoStep {
                        name: name.to_string(),
                        outcome: StepOutcome::Skipped {
                            reason: reason.clone(),
                        },
                    });
                }
            }
        }

        let report = DemoReport {
            started_at,
            finished_at: Utc::now(),
            steps,
        };
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            skipped = report.skipped(),
            "demo finished"
        );
        report
    }

    fn run_local_steps(&self, script: &DemoScript, products: &[Product], steps: &mut Vec<DemoStep>) {
        let path = self.inventory.store_path().display().to_string();

        let saved = self.inventory.snapshot(products);
        steps.push(record("save_local", &saved, |_| {
            (format!("saved {} products to {}", products.len(), path), None)
        }));

        let appended = self.inventory.add(&script.local_draft);
        steps.push(record("append_local", &appended, |product| {
            (
                format!("added product {} to {}", product.id, path),
                to_data(product),
            )
        }));

        let pruned = self.inventory.prune_above(script.price_threshold);
        steps.push(record("prune_local", &pruned, |result| {
            (
                format!(
                    "removed {} product(s) priced above {}, {} left",
                    result.removed, result.threshold, result.kept
                ),
                None,
            )
        }));
    }
}

fn record<T>(
    name: &str,
    result: &Result<T>,
    describe: impl FnOnce(&T) -> (String, Option<JsonValue>),
) -> DemoStep {
    let outcome = match result {
        Ok(value) => {
            let (detail, data) = describe(value);
            StepOutcome::Succeeded { detail, data }
        }
        Err(e) => StepOutcome::Failed {
            error: e.to_string(),
        },
    };
    DemoStep {
        name: name.to_string(),
        outcome,
    }
}

fn to_data<T: Serialize + ?Sized>(value: &T) -> Option<JsonValue> {
    serde_json::to_value(value).ok()
}
