#![allow(clippy::unwrap_used)]
// Integration tests for `NetBoxClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ipamq_api::{Error, NetBoxClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, NetBoxClient) {
    let server = MockServer::start().await;
    let token: secrecy::SecretString = "test-token".to_string().into();
    let client = NetBoxClient::new(&server.uri(), &token, &TransportConfig::default()).unwrap();
    (server, client)
}

fn page(results: serde_json::Value) -> serde_json::Value {
    json!({
        "count": results.as_array().map_or(0, Vec::len),
        "next": null,
        "previous": null,
        "results": results,
    })
}

// ── Filter queries ──────────────────────────────────────────────────

#[tokio::test]
async fn address_filter_sends_exact_match_param_and_token() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ipam/ip-addresses/"))
        .and(query_param("address", "10.1.1.5"))
        .and(header("Authorization", "Token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([{
            "id": 17,
            "address": "10.1.1.5/24",
            "dns_name": "host1",
            "description": "uplink",
            "vrf": null,
            "tenant": {"id": 1, "name": "T"},
        }]))))
        .mount(&server)
        .await;

    let addresses = client.ip_addresses_by_address("10.1.1.5").await.unwrap();

    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].id, 17);
    assert_eq!(addresses[0].address, "10.1.1.5/24");
    assert_eq!(addresses[0].dns_name.as_deref(), Some("host1"));
    assert!(addresses[0].vrf.is_none());
    assert_eq!(addresses[0].tenant.as_ref().unwrap().name.as_deref(), Some("T"));
}

#[tokio::test]
async fn list_queries_follow_pagination() {
    let (server, client) = setup().await;

    let next_url = format!("{}/api/dcim/devices/?q=sw&offset=50", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("q", "sw"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
            {"id": 3, "name": "sw-03"},
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/"))
        .and(query_param("q", "sw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 3,
            "next": next_url,
            "previous": null,
            "results": [
                {"id": 1, "name": "sw-01"},
                {"id": 2, "name": "sw-02"},
            ],
        })))
        .mount(&server)
        .await;

    let devices = client.devices_by_query("sw").await.unwrap();

    assert_eq!(devices.len(), 3);
    assert_eq!(devices[2].name.as_deref(), Some("sw-03"));
}

#[tokio::test]
async fn prefix_search_uses_q_param() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ipam/prefixes/"))
        .and(query_param("q", "10.0.0.0/24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([{
            "id": 9,
            "prefix": "10.0.0.0/24",
            "vrf": {"id": 5, "name": "red"},
            "tenant": null,
            "description": "office",
        }]))))
        .mount(&server)
        .await;

    let prefixes = client.prefixes_by_query("10.0.0.0/24").await.unwrap();

    assert_eq!(prefixes.len(), 1);
    assert_eq!(prefixes[0].prefix, "10.0.0.0/24");
    assert_eq!(prefixes[0].vrf.as_ref().unwrap().name.as_deref(), Some("red"));
}

#[tokio::test]
async fn assigned_filter_sends_both_params() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ipam/ip-addresses/"))
        .and(query_param("q", "10.1.1.5"))
        .and(query_param("assigned_to_interface", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
        .mount(&server)
        .await;

    let addresses = client.assigned_ip_addresses("10.1.1.5").await.unwrap();
    assert!(addresses.is_empty());
}

// ── Single-object lookups ───────────────────────────────────────────

#[tokio::test]
async fn device_lookup_returns_none_on_404() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/42/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Not found."})))
        .mount(&server)
        .await;

    let device = client.device(42).await.unwrap();
    assert!(device.is_none());
}

#[tokio::test]
async fn device_lookup_parses_nested_refs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/dcim/devices/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "core-01",
            "site": {"id": 2, "name": "DC1"},
            "tenant": null,
            "primary_ip4": {"address": "10.0.0.1/24"},
        })))
        .mount(&server)
        .await;

    let device = client.device(7).await.unwrap().unwrap();
    assert_eq!(device.name.as_deref(), Some("core-01"));
    assert_eq!(device.site.as_ref().unwrap().name.as_deref(), Some("DC1"));
    assert_eq!(device.primary_ip4.as_ref().unwrap().address, "10.0.0.1/24");
}

// ── Error mapping ───────────────────────────────────────────────────

#[tokio::test]
async fn rejected_token_maps_to_authentication_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Invalid token"})))
        .mount(&server)
        .await;

    let result = client.ip_addresses_by_address("10.1.1.5").await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn server_errors_map_to_backend_server() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = client.prefixes_by_query("lab").await;
    match result {
        Err(Error::BackendServer { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected BackendServer error, got: {other:?}"),
    }
}
