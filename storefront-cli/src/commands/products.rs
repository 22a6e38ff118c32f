//! Products command - remote catalog operations

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use rust_decimal::Decimal;
use storefront_core::{ProductDraft, ProductPatch, StorefrontContext};

use super::print_json;
use crate::output;

#[derive(Subcommand)]
pub enum ProductsCommands {
    /// List products
    List {
        /// Fetch at most this many products
        #[arg(long)]
        limit: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one product
    Get {
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a product
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update fields of a product
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a product
    Delete {
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(ctx: &StorefrontContext, command: ProductsCommands) -> Result<()> {
    let catalog = &ctx.catalog_service;

    match command {
        ProductsCommands::List { limit, json } => {
            let result = match limit {
                Some(n) => catalog.list_limited(n),
                None => catalog.list_all(),
            };
            if json {
                return print_json(result);
            }

            let products = result?;
            println!("{}", output::product_table(&products));
            println!("{} product(s)", products.len());
        }
        ProductsCommands::Get { id, json } => {
            let result = catalog.get(id);
            if json {
                return print_json(result);
            }
            println!("{}", output::product_detail(&result?));
        }
        ProductsCommands::Create { title, price, description, image, category, json } => {
            let draft = ProductDraft {
                title,
                price,
                description,
                image,
                category,
            };
            if let Err(reason) = draft.validate() {
                anyhow::bail!("Invalid product: {}", reason);
            }

            let result = catalog.create(&draft);
            if json {
                return print_json(result);
            }
            let product = result?;
            output::success(&format!("Product created with id {}", product.id));
            println!("{}", output::product_detail(&product));
        }
        ProductsCommands::Update { id, title, price, description, image, category, json } => {
            let patch = ProductPatch {
                title,
                price,
                description,
                image,
                category,
            };
            if patch.is_empty() {
                anyhow::bail!("Nothing to update: pass at least one of --title, --price, --description, --image, --category");
            }

            let result = catalog.update(id, &patch);
            if json {
                return print_json(result);
            }
            let product = result?;
            output::success(&format!("Product {} updated", id));
            println!("{}", output::product_detail(&product));
        }
        ProductsCommands::Delete { id, json } => {
            let result = catalog.delete(id);
            if json {
                return print_json(result);
            }
            let product = result?;
            output::success(&format!("Product {} deleted", product.id));
            println!(
                "{}",
                "Note: the demo catalog does not persist deletes; the product is still served.".dimmed()
            );
            println!("{}", output::product_detail(&product));
        }
    }

    Ok(())
}
