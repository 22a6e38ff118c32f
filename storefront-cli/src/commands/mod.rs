//! CLI command implementations

pub mod demo;
pub mod local;
pub mod products;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use storefront_core::config::Config;
use storefront_core::{OperationResult, StorefrontContext};

/// Flags shared by every subcommand
pub struct GlobalOptions {
    pub base_url: Option<String>,
    pub store: Option<PathBuf>,
}

/// Load config from the working directory and apply command-line overrides
pub fn load_config(options: &GlobalOptions) -> Result<Config> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let mut config = Config::load(&cwd)?;

    if let Some(url) = &options.base_url {
        config.base_url = url.clone();
    }
    if let Some(store) = &options.store {
        config.store_path = if store.is_absolute() {
            store.clone()
        } else {
            cwd.join(store)
        };
    }
    Ok(config)
}

/// Build the storefront context
pub fn get_context(config: Config) -> Result<StorefrontContext> {
    StorefrontContext::new(config).context("Failed to initialize storefront context")
}

/// Print a result as a JSON envelope; failures still surface as an error exit
pub fn print_json<T: Serialize>(result: storefront_core::domain::result::Result<T>) -> Result<()> {
    let envelope: OperationResult<T> = result.into();
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if !envelope.success {
        let error = envelope.error.unwrap_or_else(|| "operation failed".to_string());
        anyhow::bail!(error);
    }
    Ok(())
}
