//! Demo command - run the catalog walkthrough

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use storefront_core::services::StepOutcome;
use storefront_core::{Product, StorefrontContext};

use crate::output;

pub fn run(
    ctx: &StorefrontContext,
    limit: Option<u32>,
    threshold: Option<Decimal>,
    json: bool,
) -> Result<()> {
    let mut script = ctx.demo_script();
    if let Some(limit) = limit {
        if limit == 0 {
            anyhow::bail!("--limit must be a positive integer");
        }
        script.limit = limit;
    }
    if let Some(threshold) = threshold {
        script.price_threshold = threshold;
    }

    if !json {
        output::info(&format!(
            "Running catalog walkthrough against {}",
            ctx.catalog_service.provider_name()
        ));
        println!();
    }

    let report = ctx.demo_service.run(&script);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for step in &report.steps {
        println!("{}", format!("--- {} ---", step.name).bold());
        match &step.outcome {
            StepOutcome::Succeeded { detail, data } => {
                output::success(detail);
                if let Some(data) = data {
                    print_data(data);
                }
            }
            StepOutcome::Failed { error } => output::error(error),
            StepOutcome::Skipped { reason } => output::warning(&format!("Skipped: {}", reason)),
        }
        println!();
    }

    let elapsed = report.finished_at - report.started_at;
    println!(
        "{} {} succeeded, {} failed, {} skipped ({} ms)",
        "Walkthrough finished:".bold(),
        report.succeeded().to_string().green(),
        report.failed().to_string().red(),
        report.skipped().to_string().yellow(),
        elapsed.num_milliseconds()
    );

    Ok(())
}

/// Render step data as a product table or detail view when it has that shape
fn print_data(data: &JsonValue) {
    if let Ok(products) = serde_json::from_value::<Vec<Product>>(data.clone()) {
        println!("{}", output::product_table(&products));
    } else if let Ok(product) = serde_json::from_value::<Product>(data.clone()) {
        println!("{}", output::product_detail(&product));
    }
}
