//! JSON file product store
//!
//! Keeps products as a pretty-printed top-level JSON array in a single file,
//! plus a `<file>.seq` sidecar holding the id numbering high-water mark.
//! A full `save` starts a new numbering epoch at the highest saved id;
//! `append` advances it and pruning leaves it alone.
//!
//! Writes go straight to the target with `fs::write`. They are not atomic: a
//! crash mid-write can leave a truncated file behind. Writing to a temp file
//! and renaming it over the target is the hardening point if that matters.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::result::{Error, Result};
use crate::domain::{Product, ProductDraft};
use crate::ports::{ProductStore, PruneCount};

/// Default store file name, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "productos.json";

/// Product store backed by one JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    sequence_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut seq_name: OsString = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from(DEFAULT_STORE_FILE));
        seq_name.push(".seq");
        let sequence_path = path.with_file_name(seq_name);

        Self {
            path,
            sequence_path,
        }
    }

    /// Path of the id sequence sidecar
    pub fn sequence_path(&self) -> &Path {
        &self.sequence_path
    }

    /// Numbering high-water mark; 0 when the sidecar is missing or unreadable
    fn read_sequence(&self) -> i64 {
        match fs::read_to_string(&self.sequence_path) {
            Ok(content) => content.trim().parse().unwrap_or_else(|_| {
                warn!(path = %self.sequence_path.display(), "ignoring unreadable id sequence");
                0
            }),
            Err(_) => 0,
        }
    }

    fn write_sequence(&self, last_id: i64) -> Result<()> {
        fs::write(&self.sequence_path, last_id.to_string()).map_err(|e| Error::FileWrite {
            path: self.sequence_path.clone(),
            message: e.to_string(),
        })
    }

    /// Persist the high-water mark; the data file is already written, so a
    /// failure here only warns
    fn record_sequence(&self, last_id: i64) {
        if let Err(e) = self.write_sequence(last_id) {
            warn!(error = %e, "failed to persist id sequence");
        }
    }

    /// Write the product array without touching the id sequence
    fn write_products(&self, products: &[Product]) -> Result<()> {
        let write_error = |message: String| Error::FileWrite {
            path: self.path.clone(),
            message,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
            }
        }

        let content = serde_json::to_string_pretty(products).map_err(|e| write_error(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| write_error(e.to_string()))?;

        debug!(path = %self.path.display(), count = products.len(), "saved store");
        Ok(())
    }

    /// Next local id: never below the array length, never reusing a stored or issued id
    fn next_id(&self, current: &[Product]) -> i64 {
        let max_stored = current.iter().map(|p| p.id).max().unwrap_or(0);
        let len = i64::try_from(current.len()).unwrap_or(i64::MAX - 1);
        self.read_sequence().max(max_stored).max(len) + 1
    }
}

impl ProductStore for JsonFileStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> Result<Vec<Product>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::FileMissing(self.path.clone()))
            }
            Err(e) => {
                return Err(Error::FileRead {
                    path: self.path.clone(),
                    message: e.to_string(),
                })
            }
        };

        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|e| Error::FileParse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        debug!(path = %self.path.display(), count = products.len(), "loaded store");
        Ok(products)
    }

    fn save(&self, products: &[Product]) -> Result<()> {
        self.write_products(products)?;
        self.record_sequence(products.iter().map(|p| p.id).max().unwrap_or(0));
        Ok(())
    }

    fn append(&self, draft: &ProductDraft) -> Result<Product> {
        draft.validate().map_err(Error::validation)?;

        let mut products = self.load()?;
        let id = self.next_id(&products);
        let product = Product::from_draft(id, draft.clone());

        products.push(product.clone());
        self.write_products(&products)?;
        self.record_sequence(id);

        info!(id, title = %product.title, "appended product to local store");
        Ok(product)
    }

    fn delete_where_price_above(&self, threshold: Decimal) -> Result<PruneCount> {
        let products = self.load()?;
        let original_len = products.len();

        let kept: Vec<Product> = products
            .into_iter()
            .filter(|p| p.price <= threshold)
            .collect();
        let removed = original_len - kept.len();

        // Pruned ids stay retired, so the sequence is left as is
        self.write_products(&kept)?;

        info!(%threshold, removed, kept = kept.len(), "pruned local store");
        Ok(PruneCount {
            removed,
            kept: kept.len(),
        })
    }
}
