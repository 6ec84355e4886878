// roster-bridge-clients/tests/storefront.rs
// ============================================================================
// Module: Storefront Client Tests
// Description: Stub-backed tests for the storefront admin API client.
// Purpose: Validate order queries, metafield updates, and error mapping.
// Dependencies: roster-bridge-clients, roster-bridge-core, tiny_http, tokio
// ============================================================================

//! ## Overview
//! Tests the storefront client against a local stub for:
//! - Orders: customer and `paid` filters, access-token header, tolerant
//!   line-item decoding
//! - Metafield: PUT body shape with the boolean wire value
//! - Errors: non-success statuses map onto `StorefrontError`

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use roster_bridge_clients::ShopifyStorefront;
use roster_bridge_config::StorefrontConfig;
use roster_bridge_core::CustomerId;
use roster_bridge_core::Storefront;
use roster_bridge_core::StorefrontError;
use serde_json::Value;
use serde_json::json;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// A request observed by the stub server.
#[derive(Debug, Clone)]
struct SeenRequest {
    /// Request method.
    method: String,
    /// Request URL including query string.
    url: String,
    /// Access token header value, when present.
    access_token: Option<String>,
    /// Request body text.
    body: String,
}

/// Spawns a stub server answering with the given JSON bodies in order.
fn spawn_stub(
    responses: Vec<(u16, String)>,
) -> (String, Arc<Mutex<Vec<SeenRequest>>>, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base = format!("http://{addr}");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_writer = Arc::clone(&seen);

    let handle = thread::spawn(move || {
        for (status, body) in responses {
            let Ok(mut request) = server.recv() else {
                return;
            };
            let mut content = String::new();
            let _ = std::io::Read::read_to_string(request.as_reader(), &mut content);
            let access_token = request
                .headers()
                .iter()
                .find(|header| header.field.equiv("X-Shopify-Access-Token"))
                .map(|header| header.value.as_str().to_string());
            seen_writer.lock().unwrap().push(SeenRequest {
                method: request.method().to_string(),
                url: request.url().to_string(),
                access_token,
                body: content,
            });
            let response = Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .unwrap(),
                );
            let _ = request.respond(response);
        }
    });

    (base, seen, handle)
}

/// Builds a client pointed at the stub server.
fn client_for(base: &str) -> ShopifyStorefront {
    ShopifyStorefront::from_config(&StorefrontConfig {
        shop_domain: base.to_string(),
        access_token: "shpat-test".to_string(),
        api_version: "2023-01".to_string(),
        onboarding_metafield_id: "123456789".to_string(),
    })
    .unwrap()
}

// ============================================================================
// SECTION: Order Tests
// ============================================================================

#[tokio::test]
async fn paid_orders_filters_customer_and_status() {
    let body = json!({"orders": [
        {"id": 1, "line_items": [{"product_id": 999}, {"title": "custom item"}]}
    ]})
    .to_string();
    let (base, seen, handle) = spawn_stub(vec![(200, body)]);
    let storefront = client_for(&base);

    let orders = storefront.paid_orders(&CustomerId::new("C1")).await.unwrap();
    handle.join().unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].line_items.len(), 2);
    assert_eq!(orders[0].line_items[0].product_id, Some(999));
    assert_eq!(orders[0].line_items[1].product_id, None);
    let requests = seen.lock().unwrap();
    assert_eq!(requests[0].method, "GET");
    assert!(requests[0].url.starts_with("/admin/api/2023-01/orders.json"));
    assert!(requests[0].url.contains("customer_id=C1"));
    assert!(requests[0].url.contains("financial_status=paid"));
    assert_eq!(requests[0].access_token.as_deref(), Some("shpat-test"));
}

#[tokio::test]
async fn paid_orders_accepts_empty_payload() {
    let (base, _seen, handle) = spawn_stub(vec![(200, "{}".to_string())]);
    let storefront = client_for(&base);

    let orders = storefront.paid_orders(&CustomerId::new("C1")).await.unwrap();
    handle.join().unwrap();

    assert!(orders.is_empty());
}

#[tokio::test]
async fn paid_orders_maps_auth_failure() {
    let (base, _seen, handle) = spawn_stub(vec![(401, "{\"errors\":\"denied\"}".to_string())]);
    let storefront = client_for(&base);

    let err = storefront.paid_orders(&CustomerId::new("C1")).await.unwrap_err();
    handle.join().unwrap();

    assert!(matches!(
        err,
        StorefrontError::Status {
            status: 401,
            ..
        }
    ));
}

// ============================================================================
// SECTION: Metafield Tests
// ============================================================================

#[tokio::test]
async fn set_onboarding_flag_puts_boolean_metafield() {
    let body = json!({"metafield": {
        "id": "123456789",
        "namespace": "custom",
        "key": "onboarded",
        "value": "true",
    }})
    .to_string();
    let (base, seen, handle) = spawn_stub(vec![(200, body)]);
    let storefront = client_for(&base);

    let metafield = storefront.set_onboarding_flag(&CustomerId::new("C1")).await.unwrap();
    handle.join().unwrap();

    assert_eq!(metafield.value, "true");
    let requests = seen.lock().unwrap();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].url, "/admin/api/2023-01/customers/C1/metafields/123456789.json");
    let sent: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["metafield"]["id"], json!(123_456_789));
    assert_eq!(sent["metafield"]["value"], json!("true"));
    assert_eq!(sent["metafield"]["type"], json!("boolean"));
}

#[tokio::test]
async fn set_onboarding_flag_propagates_failure() {
    let (base, _seen, handle) = spawn_stub(vec![(500, "{}".to_string())]);
    let storefront = client_for(&base);

    let err = storefront.set_onboarding_flag(&CustomerId::new("C1")).await.unwrap_err();
    handle.join().unwrap();

    assert!(matches!(
        err,
        StorefrontError::Status {
            status: 500,
            ..
        }
    ));
}
