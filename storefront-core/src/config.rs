//! Configuration management
//!
//! Settings come from an optional `storefront.json` in the working directory:
//! ```json
//! {
//!   "baseUrl": "https://fakestoreapi.com",
//!   "storePath": "productos.json",
//!   "timeoutSecs": 30,
//!   "logLevel": "warn",
//!   "demo": { "limit": 5, "threshold": 20 }
//! }
//! ```
//! `STOREFRONT_BASE_URL` and `STOREFRONT_STORE` override the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapters::fakestore::{DEFAULT_TIMEOUT_SECS, FAKESTORE_PRODUCTION_URL};
use crate::adapters::json_file::DEFAULT_STORE_FILE;

/// Settings file name looked up in the working directory
pub const SETTINGS_FILE: &str = "storefront.json";

/// Environment variable overriding the catalog base URL
pub const BASE_URL_ENV: &str = "STOREFRONT_BASE_URL";

/// Environment variable overriding the store file path
pub const STORE_PATH_ENV: &str = "STOREFRONT_STORE";

/// Raw storefront.json structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    store_path: Option<PathBuf>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    log_level: Option<String>,
    #[serde(default)]
    demo: DemoSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DemoSettings {
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    threshold: Option<Decimal>,
}

/// Storefront configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    /// Store file; relative paths resolve against the directory config was loaded from
    pub store_path: PathBuf,
    pub timeout_secs: u64,
    pub log_level: String,
    pub demo_limit: u32,
    pub demo_threshold: Decimal,
    /// Problems found while loading that fell back to defaults; logged by the
    /// caller once logging is set up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: FAKESTORE_PRODUCTION_URL.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: "warn".to_string(),
            demo_limit: 5,
            demo_threshold: Decimal::new(20, 0),
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from `dir`, applying environment overrides
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_with_env(dir, |key| std::env::var(key).ok())
    }

    /// Load config with an explicit environment lookup
    pub fn load_with_env(dir: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let settings_path = dir.join(SETTINGS_FILE);
        let mut warnings = Vec::new();

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {}", settings_path.display()))?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warnings.push(format!(
                    "ignoring malformed {}: {}",
                    settings_path.display(),
                    e
                ));
                SettingsFile::default()
            })
        } else {
            SettingsFile::default()
        };

        let defaults = Self::default();

        let base_url = env(BASE_URL_ENV)
            .filter(|v| !v.trim().is_empty())
            .or(raw.base_url)
            .unwrap_or(defaults.base_url);

        let store_path = env(STORE_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or(raw.store_path)
            .unwrap_or(defaults.store_path);

        let demo_limit = match raw.demo.limit {
            Some(0) => {
                warnings.push(format!(
                    "demo.limit must be positive, using {}",
                    defaults.demo_limit
                ));
                defaults.demo_limit
            }
            Some(n) => n,
            None => defaults.demo_limit,
        };

        Ok(Self {
            base_url,
            store_path: resolve(dir, store_path),
            timeout_secs: raw.timeout_secs.unwrap_or(defaults.timeout_secs),
            log_level: raw.log_level.unwrap_or(defaults.log_level),
            demo_limit,
            demo_threshold: raw.demo.threshold.unwrap_or(defaults.demo_threshold),
            warnings,
        })
    }
}

fn resolve(dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        dir.join(path)
    }
}
