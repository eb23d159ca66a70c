#![allow(clippy::unwrap_used)]
// Integration tests for `PhpIpamClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ipamq_api::{Error, PhpIpamAuth, PhpIpamClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

fn token_auth(token: &str) -> PhpIpamAuth {
    PhpIpamAuth::Token(token.to_string().into())
}

fn password_auth(username: &str, password: &str) -> PhpIpamAuth {
    PhpIpamAuth::Credentials {
        username: username.into(),
        password: password.to_string().into(),
    }
}

async fn setup(auth: PhpIpamAuth) -> (MockServer, PhpIpamClient) {
    let server = MockServer::start().await;
    let client =
        PhpIpamClient::new(&server.uri(), "query", auth, &TransportConfig::default()).unwrap();
    (server, client)
}

fn envelope(data: serde_json::Value) -> serde_json::Value {
    json!({"code": 200, "success": true, "data": data})
}

// ── Session establishment ───────────────────────────────────────────

#[tokio::test]
async fn static_token_needs_no_login_call() {
    let (server, client) = setup(token_auth("sekrit")).await;

    // No /user/ mock mounted: a login attempt would 404 and fail the test.
    Mock::given(method("GET"))
        .and(path("/api/query/addresses/search/10.1.1.5/"))
        .and(header("phpipam-token", "sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": "11", "subnetId": "7", "ip": "10.1.1.5", "hostname": "h1", "description": "d"},
        ]))))
        .mount(&server)
        .await;

    client.ensure_session().await.unwrap();
    let addresses = client.search_addresses("10.1.1.5").await.unwrap();

    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].ip, "10.1.1.5");
    assert_eq!(addresses[0].subnet_id, "7");
}

#[tokio::test]
async fn password_auth_logs_in_exactly_once() {
    let (server, client) = setup(password_auth("admin", "hunter2")).await;

    Mock::given(method("POST"))
        .and(path("/api/query/user/"))
        .and(basic_auth("admin", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({"token": "tok123"}))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/query/addresses/search/10.1.1.5/"))
        .and(header("phpipam-token", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(2)
        .mount(&server)
        .await;

    // Two data calls within one process run: one login, token reused.
    client.ensure_session().await.unwrap();
    client.search_addresses("10.1.1.5").await.unwrap();
    client.ensure_session().await.unwrap();
    client.search_addresses("10.1.1.5").await.unwrap();
}

#[tokio::test]
async fn login_envelope_failure_is_an_auth_error() {
    let (server, client) = setup(password_auth("admin", "wrong")).await;

    Mock::given(method("POST"))
        .and(path("/api/query/user/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 500, "success": false, "message": "Invalid username or password",
        })))
        .mount(&server)
        .await;

    let result = client.ensure_session().await;
    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("Invalid username or password"));
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn login_http_failure_is_an_auth_error() {
    let (server, client) = setup(password_auth("admin", "hunter2")).await;

    Mock::given(method("POST"))
        .and(path("/api/query/user/"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let result = client.ensure_session().await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

// ── Search endpoints ────────────────────────────────────────────────

#[tokio::test]
async fn search_404_means_zero_results() {
    let (server, client) = setup(token_auth("sekrit")).await;

    Mock::given(method("GET"))
        .and(path("/api/query/addresses/search/10.9.9.9/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404, "success": false, "message": "Address not found",
        })))
        .mount(&server)
        .await;

    client.ensure_session().await.unwrap();
    let addresses = client.search_addresses("10.9.9.9").await.unwrap();
    assert!(addresses.is_empty());
}

#[tokio::test]
async fn hostname_search_hits_search_hostbase() {
    let (server, client) = setup(token_auth("sekrit")).await;

    Mock::given(method("GET"))
        .and(path("/api/query/addresses/search_hostbase/web/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": "4", "subnetId": "2", "ip": "172.16.0.4", "hostname": "web01", "description": null},
        ]))))
        .mount(&server)
        .await;

    client.ensure_session().await.unwrap();
    let addresses = client.search_hostnames("web").await.unwrap();
    assert_eq!(addresses[0].hostname.as_deref(), Some("web01"));
    assert!(addresses[0].description.is_none());
}

#[tokio::test]
async fn subnet_listing_500_is_a_backend_server_error() {
    let (server, client) = setup(token_auth("sekrit")).await;

    Mock::given(method("GET"))
        .and(path("/api/query/subnets/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("PHP Fatal error"))
        .mount(&server)
        .await;

    client.ensure_session().await.unwrap();
    let err = client.list_subnets().await.unwrap_err();
    assert!(err.is_server_fault(), "expected BackendServer, got: {err:?}");
    assert!(matches!(err, Error::BackendServer { status: 500, .. }));
}

// ── Object lookups ──────────────────────────────────────────────────

#[tokio::test]
async fn subnet_and_section_lookups_unwrap_envelopes() {
    let (server, client) = setup(token_auth("sekrit")).await;

    Mock::given(method("GET"))
        .and(path("/api/query/subnets/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "7", "subnet": "10.1.1.0", "mask": "24",
            "description": "lab net", "sectionId": "2",
        }))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/query/sections/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "2", "name": "Lab",
        }))))
        .mount(&server)
        .await;

    client.ensure_session().await.unwrap();
    let subnet = client.subnet("7").await.unwrap();
    assert_eq!(subnet.section_id, "2");

    let section = client.section(&subnet.section_id).await.unwrap();
    assert_eq!(section.name, "Lab");
}
