//! Result and error types for the core library

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core library error type
///
/// Every catalog call and store operation reports failures through this type.
/// Nothing in the core panics on a bad response or a broken file.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{operation}: network error: {message}")]
    Network { operation: String, message: String },

    #[error("{operation}: catalog API returned HTTP {status}")]
    Status { operation: String, status: u16 },

    #[error("{operation}: could not decode response: {message}")]
    Decode { operation: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store file not found: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("Failed to read {}: {message}", .path.display())]
    FileRead { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", .path.display())]
    FileParse { path: PathBuf, message: String },

    #[error("Failed to write {}: {message}", .path.display())]
    FileWrite { path: PathBuf, message: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a network error
    pub fn network(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Name of the remote operation that failed, if this is a catalog error
    pub fn operation(&self) -> Option<&str> {
        match self {
            Self::Network { operation, .. }
            | Self::Status { operation, .. }
            | Self::Decode { operation, .. } => Some(operation.as_str()),
            _ => None,
        }
    }

    /// True for failures caused by the local store file
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::FileMissing(_)
                | Self::FileRead { .. }
                | Self::FileParse { .. }
                | Self::FileWrite { .. }
        )
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// Operation result with optional context (for `--json` output)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub context: Option<HashMap<String, serde_json::Value>>,
}

impl<T> OperationResult<T> {
    /// Create a successful result
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            context: None,
        }
    }

    /// Create a failed result
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            context: None,
        }
    }

    /// Attach a context value (e.g. the operation name)
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }
}

impl<T> From<Result<T>> for OperationResult<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => {
                let operation = e.operation().map(str::to_string);
                let failed = Self::fail(e.to_string());
                match operation {
                    Some(op) => failed.with_context("operation", serde_json::json!(op)),
                    None => failed,
                }
            }
        }
    }
}
