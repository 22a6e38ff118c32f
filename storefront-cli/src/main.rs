//! Storefront CLI - product catalog in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{demo, local, products, GlobalOptions};

/// Storefront - product catalog in your terminal
#[derive(Parser)]
#[command(name = "sf", version, about, long_about = None)]
struct Cli {
    /// Catalog API base URL (overrides storefront.json and STOREFRONT_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Local store file (overrides storefront.json and STOREFRONT_STORE)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Show debug logs
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full catalog walkthrough (default)
    Demo {
        /// Number of products to fetch and save locally
        #[arg(long)]
        limit: Option<u32>,
        /// Price above which local products are removed
        #[arg(long)]
        threshold: Option<Decimal>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Work with the remote catalog
    Products {
        #[command(subcommand)]
        command: products::ProductsCommands,
    },

    /// Work with the local product file
    Local {
        #[command(subcommand)]
        command: local::LocalCommands,
    },
}

fn init_logging(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,storefront_core={0},sf={0}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let options = GlobalOptions {
        base_url: cli.base_url,
        store: cli.store,
    };
    let config = commands::load_config(&options)?;
    init_logging(&config.log_level, cli.verbose);
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::debug!(
        base_url = %config.base_url,
        store = %config.store_path.display(),
        "configuration loaded"
    );

    let ctx = commands::get_context(config)?;

    match cli.command {
        None => demo::run(&ctx, None, None, false),
        Some(Commands::Demo { limit, threshold, json }) => demo::run(&ctx, limit, threshold, json),
        Some(Commands::Products { command }) => products::run(&ctx, command),
        Some(Commands::Local { command }) => local::run(&ctx, command),
    }
}
