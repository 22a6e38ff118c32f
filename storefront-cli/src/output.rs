//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use storefront_core::Product;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per product
pub fn product_table(products: &[Product]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Title", "Price", "Category"]);
    for p in products {
        table.add_row(vec![
            p.id.to_string(),
            p.title.clone(),
            format_price(p),
            p.category.clone().unwrap_or_default(),
        ]);
    }
    table
}

/// Vertical key-value view of a single product
pub fn product_detail(product: &Product) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec!["ID".to_string(), product.id.to_string()]);
    table.add_row(vec!["Title".to_string(), product.title.clone()]);
    table.add_row(vec!["Price".to_string(), format_price(product)]);
    if let Some(category) = &product.category {
        table.add_row(vec!["Category".to_string(), category.clone()]);
    }
    if let Some(description) = &product.description {
        table.add_row(vec!["Description".to_string(), description.clone()]);
    }
    if let Some(image) = &product.image {
        table.add_row(vec!["Image".to_string(), image.clone()]);
    }
    if let Some(rating) = &product.rating {
        table.add_row(vec![
            "Rating".to_string(),
            format!("{} ({} reviews)", rating.rate, rating.count),
        ]);
    }
    table
}

fn format_price(product: &Product) -> String {
    format!("${:.2}", product.price)
}
