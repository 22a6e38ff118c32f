//! Fake Store API client
//!
//! Handles communication with a Fake Store compatible product catalog.
//! The public instance at https://fakestoreapi.com accepts writes but never
//! persists them: POST, PUT and DELETE only echo what a real service would do.
//!
//! API Documentation: https://fakestoreapi.com/docs

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::domain::result::{Error, Result};
use crate::domain::{Product, ProductDraft, ProductPatch};
use crate::ports::CatalogProvider;

/// Default production API URL
pub const FAKESTORE_PRODUCTION_URL: &str = "https://fakestoreapi.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Fake Store HTTP Client
// =============================================================================

/// Fake Store API client
#[derive(Debug)]
pub struct FakeStoreClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl FakeStoreClient {
    /// Create a client for the public Fake Store API
    pub fn new() -> Result<Self> {
        Self::new_with_base_url(FAKESTORE_PRODUCTION_URL)
    }

    /// Create a client against a custom base URL (mock servers, self-hosted copies)
    pub fn new_with_base_url(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom base URL and request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(Error::Config("catalog base URL cannot be empty".to_string()));
        }

        let base_url = Url::parse(trimmed)
            .map_err(|e| Error::Config(format!("invalid catalog base URL '{}': {}", trimmed, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "catalog base URL must be an http(s) URL, got '{}'",
                trimmed
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Build `{base}/{segments...}`
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base URLs are rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(segments);
        }
        url
    }

    fn item_endpoint(&self, id: i64) -> Url {
        self.endpoint(&["products", &id.to_string()])
    }

    /// Send one request and return the raw body
    ///
    /// `id` is the product the request targets, used to turn a 404 into
    /// `Error::NotFound`.
    fn execute(&self, operation: &str, request: RequestBuilder, id: Option<i64>) -> Result<String> {
        let response = request
            .send()
            .map_err(|e| self.map_request_error(operation, e))?;

        self.check_response_status(operation, response.status(), id)?;

        response
            .text()
            .map_err(|e| Error::network(operation, format!("failed to read response body: {}", e)))
    }

    /// Decode a single product, treating an empty or `null` body as unknown id
    fn decode_product(operation: &str, id: i64, body: &str) -> Result<Product> {
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(Error::not_found(format!("product {}", id)));
        }
        decode(operation, trimmed)
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, operation: &str, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::network(
                operation,
                format!("connection timed out after {} seconds", self.timeout.as_secs()),
            )
        } else if error.is_connect() {
            Error::network(
                operation,
                format!("unable to connect to catalog API at {}", self.base_url()),
            )
        } else {
            Error::network(operation, format!("request failed: {}", error))
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, operation: &str, status: StatusCode, id: Option<i64>) -> Result<()> {
        if status.is_success() {
            return Ok(());
        }
        match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => Err(Error::not_found(format!("product {}", id))),
            _ => Err(Error::Status {
                operation: operation.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

fn decode<T: DeserializeOwned>(operation: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::decode(operation, e.to_string()))
}

// =============================================================================
// CatalogProvider implementation
// =============================================================================

impl CatalogProvider for FakeStoreClient {
    fn name(&self) -> &str {
        "fakestore"
    }

    fn list_all(&self) -> Result<Vec<Product>> {
        let url = self.endpoint(&["products"]);
        debug!(%url, "GET products");

        let body = self.execute("list_all", self.client.get(url), None)?;
        decode("list_all", &body)
    }

    fn list_limited(&self, limit: u32) -> Result<Vec<Product>> {
        if limit == 0 {
            return Err(Error::validation("limit must be a positive integer"));
        }

        let mut url = self.endpoint(&["products"]);
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        debug!(%url, limit, "GET products (limited)");

        let body = self.execute("list_limited", self.client.get(url), None)?;
        let mut products: Vec<Product> = decode("list_limited", &body)?;

        let limit = limit as usize;
        if products.len() > limit {
            warn!(
                received = products.len(),
                limit, "catalog ignored the limit parameter, truncating"
            );
            products.truncate(limit);
        }
        Ok(products)
    }

    fn get_by_id(&self, id: i64) -> Result<Product> {
        let url = self.item_endpoint(id);
        debug!(%url, id, "GET product");

        let body = self.execute("get_by_id", self.client.get(url), Some(id))?;
        Self::decode_product("get_by_id", id, &body)
    }

    fn create(&self, draft: &ProductDraft) -> Result<Product> {
        let url = self.endpoint(&["products"]);
        debug!(%url, title = %draft.title, "POST product");

        // .json() sets Content-Type: application/json
        let body = self.execute("create", self.client.post(url).json(draft), None)?;
        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Err(Error::decode("create", "empty response body"));
        }
        decode("create", trimmed)
    }

    fn update(&self, id: i64, patch: &ProductPatch) -> Result<Product> {
        if patch.is_empty() {
            return Err(Error::validation("update needs at least one field"));
        }

        let url = self.item_endpoint(id);
        debug!(%url, id, "PUT product");

        let body = self.execute("update", self.client.put(url).json(patch), Some(id))?;
        Self::decode_product("update", id, &body)
    }

    fn delete(&self, id: i64) -> Result<Product> {
        let url = self.item_endpoint(id);
        debug!(%url, id, "DELETE product");

        let body = self.execute("delete", self.client.delete(url), Some(id))?;
        Self::decode_product("delete", id, &body)
    }
}

// =============================================================================
// Tests
// =============================================================================
