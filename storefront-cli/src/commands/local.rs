//! Local command - manage the local product file

use anyhow::Result;
use clap::Subcommand;
use rust_decimal::Decimal;
use storefront_core::services::InventorySummary;
use storefront_core::{Error, ProductDraft, StorefrontContext};

use super::print_json;
use crate::output;

#[derive(Subcommand)]
pub enum LocalCommands {
    /// Fetch products from the catalog and overwrite the local file with them
    Save {
        /// Number of products to fetch (defaults to the demo limit)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show the products in the local file
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a product to the local file
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value = "local")]
        category: String,
    },

    /// Remove products priced above a threshold
    Prune {
        #[arg(long)]
        max_price: Decimal,
    },
}

pub fn run(ctx: &StorefrontContext, command: LocalCommands) -> Result<()> {
    let inventory = &ctx.inventory_service;
    let path = inventory.store_path().display().to_string();

    let result = match command {
        LocalCommands::Save { limit } => {
            let limit = limit.unwrap_or(ctx.config.demo_limit);
            let products = ctx.catalog_service.list_limited(limit)?;
            inventory.snapshot(&products).map(|()| {
                output::success(&format!("Saved {} product(s) to {}", products.len(), path));
            })
        }
        LocalCommands::List { json } => {
            if json {
                return print_json(inventory.list());
            }
            inventory.list().map(|products| {
                let summary = InventorySummary::from_products(&products);
                println!("{}", output::product_table(&products));
                println!("{} product(s) in {}", summary.count, path);
                if let (Some(min), Some(max), Some(avg)) =
                    (summary.min_price, summary.max_price, summary.average_price)
                {
                    println!("Price range: ${:.2} to ${:.2}, average ${:.2}", min, max, avg);
                }
            })
        }
        LocalCommands::Add { title, price, description, category } => {
            let mut draft = ProductDraft::new(title, price).with_category(category);
            draft.description = description;
            inventory.add(&draft).map(|product| {
                output::success(&format!("Added product {} to {}", product.id, path));
                println!("{}", output::product_detail(&product));
            })
        }
        LocalCommands::Prune { max_price } => inventory.prune_above(max_price).map(|result| {
            output::success(&format!(
                "Removed {} product(s) priced above ${:.2}; {} left",
                result.removed, result.threshold, result.kept
            ));
        }),
    };

    if let Err(Error::FileMissing(_)) = &result {
        output::warning(&format!(
            "{} does not exist yet. Run 'sf local save' to create it.",
            path
        ));
    }
    result.map_err(Into::into)
}
