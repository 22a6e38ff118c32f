//! Mock Fake Store API server for testing
//!
//! Serves the same routes as the real catalog so the client and the demo
//! script can be exercised without network access:
//! - GET /products[?limit=N] returns a JSON array
//! - GET/PUT/DELETE /products/{id} return a product, or an empty 200 body
//!   for unknown ids (the real service does the same)
//! - POST /products echoes the body with a new id

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

/// Mock catalog server for testing
pub struct MockCatalogServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock behavior
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of products in the catalog (ids 1..=N)
    pub num_products: usize,
    /// Answer every request with this status and an error body
    pub fail_status: Option<u16>,
    /// Return the whole catalog even when `limit` is given
    pub ignore_limit: bool,
    /// Answer 200 with a body that is not JSON
    pub malformed_body: bool,
    /// Answer 404 for unknown ids instead of an empty 200 body
    pub not_found_status: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            num_products: 20,
            fail_status: None,
            ignore_limit: false,
            malformed_body: false,
            not_found_status: false,
        }
    }
}

/// A request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl MockCatalogServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = requests.clone();

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let log = requests_clone.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg, &log);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockCatalogServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    // Accepted sockets may inherit non-blocking mode from the listener
    stream.set_nonblocking(false).ok()?;
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).ok()? == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.trim().parse().unwrap_or(0),
                "content-type" => content_type = Some(value.trim().to_string()),
                _ => {}
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;

    Some(RecordedRequest {
        method,
        path,
        content_type,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, log: &Mutex<Vec<RecordedRequest>>) {
    let Some(request) = read_request(&stream) else {
        send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
        return;
    };

    if let Ok(mut log) = log.lock() {
        log.push(request.clone());
    }

    if let Some(status) = config.fail_status {
        send_response(&mut stream, status, "Error", r#"{"error": "Simulated failure"}"#);
        return;
    }

    if config.malformed_body {
        send_response(&mut stream, 200, "OK", "<html>maintenance</html>");
        return;
    }

    let (path, query) = match request.path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (request.path.as_str(), None),
    };
    let catalog = generate_mock_products(config.num_products);

    match (request.method.as_str(), path) {
        ("GET", "/products") => {
            let limit = query
                .and_then(|q| q.split('&').find_map(|kv| kv.strip_prefix("limit=")))
                .and_then(|v| v.parse::<usize>().ok());
            let products: Vec<JsonValue> = match limit {
                Some(n) if !config.ignore_limit => catalog.into_iter().take(n).collect(),
                _ => catalog,
            };
            send_response(&mut stream, 200, "OK", &JsonValue::Array(products).to_string());
        }
        ("POST", "/products") => {
            let mut created: JsonValue =
                serde_json::from_str(&request.body).unwrap_or_else(|_| json!({}));
            created["id"] = json!(config.num_products + 1);
            send_response(&mut stream, 200, "OK", &created.to_string());
        }
        (method, p) if p.starts_with("/products/") => {
            let id = p
                .trim_start_matches("/products/")
                .parse::<usize>()
                .unwrap_or(0);
            let existing = catalog.into_iter().find(|product| product["id"] == json!(id));

            let Some(mut product) = existing else {
                if config.not_found_status {
                    send_response(&mut stream, 404, "Not Found", r#"{"error": "not found"}"#);
                } else {
                    send_response(&mut stream, 200, "OK", "");
                }
                return;
            };

            match method {
                "GET" | "DELETE" => {
                    send_response(&mut stream, 200, "OK", &product.to_string());
                }
                "PUT" => {
                    if let Ok(JsonValue::Object(fields)) =
                        serde_json::from_str::<JsonValue>(&request.body)
                    {
                        for (key, value) in fields {
                            product[key] = value;
                        }
                    }
                    send_response(&mut stream, 200, "OK", &product.to_string());
                }
                _ => send_response(
                    &mut stream,
                    405,
                    "Method Not Allowed",
                    r#"{"error": "Method not allowed"}"#,
                ),
            }
        }
        _ => {
            send_response(
                &mut stream,
                404,
                "Not Found",
                r#"{"error": "Endpoint not found"}"#,
            );
        }
    }
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// Deterministic catalog; prices straddle 20 so pruning has work to do
pub fn generate_mock_products(count: usize) -> Vec<JsonValue> {
    let items = [
        ("Fjallraven Backpack", 109.95, "men's clothing"),
        ("Slim Fit T-Shirt", 22.3, "men's clothing"),
        ("Cotton Jacket", 55.99, "men's clothing"),
        ("Casual Slim Fit", 15.99, "men's clothing"),
        ("Dragon Station Bracelet", 695.0, "jewelery"),
        ("Solid Gold Petite Micropave", 168.0, "jewelery"),
        ("White Gold Plated Princess", 9.99, "jewelery"),
        ("Pierced Owl Rose Gold", 10.99, "jewelery"),
        ("Portable External Hard Drive", 64.0, "electronics"),
        ("SanDisk SSD PLUS 1TB", 109.0, "electronics"),
    ];

    (0..count)
        .map(|i| {
            let (title, price, category) = items[i % items.len()];
            json!({
                "id": i + 1,
                "title": title,
                "price": price,
                "description": format!("{} description", title),
                "category": category,
                "image": format!("https://fakestoreapi.com/img/{}.jpg", i + 1),
                "rating": { "rate": 3.9, "count": 100 + i }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::adapters::fakestore::FakeStoreClient;
    use crate::domain::result::Error;
    use crate::domain::{ProductDraft, ProductPatch};
    use crate::ports::CatalogProvider;

    fn client_for(server: &MockCatalogServer) -> FakeStoreClient {
        FakeStoreClient::new_with_base_url(&server.base_url()).unwrap()
    }

    #[test]
    fn test_list_all() {
        let server = MockCatalogServer::start(MockConfig::default()).unwrap();
        let products = client_for(&server).list_all().unwrap();

        assert_eq!(products.len(), 20);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].price, Decimal::new(10995, 2));
    }

    #[test]
    fn test_list_limited_respects_limit() {
        let server = MockCatalogServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        for limit in [1u32, 5, 20, 50] {
            let products = client.list_limited(limit).unwrap();
            assert!(products.len() <= limit as usize);
        }
        assert_eq!(client.list_limited(5).unwrap().len(), 5);
        assert!(server
            .requests()
            .iter()
            .any(|r| r.path == "/products?limit=5"));
    }

    #[test]
    fn test_list_limited_truncates_when_server_ignores_limit() {
        let server = MockCatalogServer::start(MockConfig {
            ignore_limit: true,
            ..Default::default()
        })
        .unwrap();

        let products = client_for(&server).list_limited(3).unwrap();
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_get_by_id() {
        let server = MockCatalogServer::start(MockConfig::default()).unwrap();
        let product = client_for(&server).get_by_id(3).unwrap();
        assert_eq!(product.id, 3);
        assert_eq!(product.title, "Cotton Jacket");
    }

    #[test]
    fn test_get_unknown_id_is_not_found() {
        let server = MockCatalogServer::start(MockConfig::default()).unwrap();
        let result = client_for(&server).get_by_id(999);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_get_unknown_id_with_404_is_not_found() {
        let server = MockCatalogServer::start(MockConfig {
            not_found_status: true,
            ..Default::default()
        })
        .unwrap();
        let result = client_for(&server).get_by_id(999);
        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_create_posts_json() {
        let server = MockCatalogServer::start(MockConfig::default()).unwrap();
        let draft = ProductDraft::new("Test API Product", Decimal::new(135, 1))
            .with_description("Sample")
            .with_image("https://i.pravatar.cc")
            .with_category("electronic");

        let created = client_for(&server).create(&draft).unwrap();
        assert_eq!(created.id, 21);
        assert_eq!(created.title, "Test API Product");
        assert_eq!(created.price, Decimal::new(135, 1));

        let requests = server.requests();
        let post = requests.iter().find(|r| r.method == "POST").unwrap();
        assert_eq!(post.content_type.as_deref(), Some("application/json"));
        let body: JsonValue = serde_json::from_str(&post.body).unwrap();
        assert!(body.get("id").is_none());
        assert_eq!(body["category"], json!("electronic"));
    }

    #[test]
    fn test_update_merges_fields() {
        let server = MockCatalogServer::start(MockConfig::default()).unwrap();
        let patch = ProductPatch {
            title: Some("MODIFIED title".to_string()),
            price: Some(Decimal::new(255, 1)),
            ..Default::default()
        };

        let updated = client_for(&server).update(7, &patch).unwrap();
        assert_eq!(updated.id, 7);
        assert_eq!(updated.title, "MODIFIED title");
        assert_eq!(updated.price, Decimal::new(255, 1));
        assert_eq!(updated.category.as_deref(), Some("jewelery"));
    }

    #[test]
    fn test_delete_echoes_record() {
        let server = MockCatalogServer::start(MockConfig::default()).unwrap();
        let client = client_for(&server);

        let deleted = client.delete(10).unwrap();
        assert_eq!(deleted.id, 10);
        // The catalog keeps the record after a delete
        assert!(client.get_by_id(10).is_ok());
    }

    #[test]
    fn test_server_error_is_status_failure() {
        let server = MockCatalogServer::start(MockConfig {
            fail_status: Some(503),
            ..Default::default()
        })
        .unwrap();

        let err = client_for(&server).list_all().unwrap_err();
        assert!(matches!(err, Error::Status { status: 503, .. }));
        assert_eq!(err.operation(), Some("list_all"));
    }

    #[test]
    fn test_malformed_body_is_decode_failure() {
        let server = MockCatalogServer::start(MockConfig {
            malformed_body: true,
            ..Default::default()
        })
        .unwrap();

        let err = client_for(&server).list_limited(5).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
        assert_eq!(err.operation(), Some("list_limited"));
    }

    #[test]
    fn test_connection_refused_is_network_failure() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = FakeStoreClient::new_with_base_url(&format!("http://127.0.0.1:{}", port)).unwrap();

        let err = client.get_by_id(1).unwrap_err();
        assert!(matches!(err, Error::Network { .. }));
        assert_eq!(err.operation(), Some("get_by_id"));
    }
}
