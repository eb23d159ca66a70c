// NetBox API HTTP client
//
// Wraps `reqwest::Client` with NetBox-specific URL construction, token
// auth, and transparent pagination. All filter endpoints are GET queries
// against the DRF list resources; the `Page` envelope is followed to
// exhaustion before results reach the caller.

pub mod models;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use models::{Device, IpAddress, Page, Prefix};

/// Async client for the NetBox REST API.
///
/// Authenticates with a static API token sent as `Authorization: Token …`
/// on every request.
pub struct NetBoxClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NetBoxClient {
    /// Build a client from the instance root URL and an API token.
    ///
    /// Injects the `Authorization` header as a default header on every
    /// request; the header value is marked sensitive so it never shows up
    /// in debug output.
    pub fn new(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut value = HeaderValue::from_str(&format!("Token {}", token.expose_secret()))
            .map_err(|e| Error::Authentication {
                message: format!("invalid API token header value: {e}"),
            })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Url::parse(base_url)?;

        Ok(Self { http, base_url })
    }

    /// The instance root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a list endpoint, following `next` links until the last page.
    async fn get_all<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, Error> {
        let mut url = self.api_url(path);
        url.query_pairs_mut().extend_pairs(params);

        let mut results = Vec::new();
        loop {
            debug!("GET {url}");
            let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
            let page: Page<T> = parse_json(resp).await?;
            results.extend(page.results);

            match page.next {
                Some(next) => url = Url::parse(&next)?,
                None => break,
            }
        }
        Ok(results)
    }

    /// GET a single-object endpoint. A 404 means the object is gone,
    /// not that the call failed.
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, Error> {
        let url = self.api_url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        parse_json(resp).await.map(Some)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Exact-match lookup of IP addresses.
    ///
    /// `GET /api/ipam/ip-addresses/?address=<ip>`
    pub async fn ip_addresses_by_address(&self, address: &str) -> Result<Vec<IpAddress>, Error> {
        self.get_all("ipam/ip-addresses/", &[("address", address)])
            .await
    }

    /// Keyword search over IP addresses that are assigned to an interface.
    ///
    /// `GET /api/ipam/ip-addresses/?q=<q>&assigned_to_interface=true`
    pub async fn assigned_ip_addresses(&self, q: &str) -> Result<Vec<IpAddress>, Error> {
        self.get_all(
            "ipam/ip-addresses/",
            &[("q", q), ("assigned_to_interface", "true")],
        )
        .await
    }

    /// Interface-assigned IP addresses whose parent prefix is `cidr`.
    ///
    /// `GET /api/ipam/ip-addresses/?parent=<cidr>&assigned_to_interface=true`
    pub async fn assigned_ip_addresses_in_prefix(
        &self,
        cidr: &str,
    ) -> Result<Vec<IpAddress>, Error> {
        self.get_all(
            "ipam/ip-addresses/",
            &[("parent", cidr), ("assigned_to_interface", "true")],
        )
        .await
    }

    /// Keyword search over devices.
    ///
    /// `GET /api/dcim/devices/?q=<name>`
    pub async fn devices_by_query(&self, name: &str) -> Result<Vec<Device>, Error> {
        self.get_all("dcim/devices/", &[("q", name)]).await
    }

    /// Fetch a single device by numeric ID. Returns `None` on 404.
    ///
    /// `GET /api/dcim/devices/<id>/`
    pub async fn device(&self, id: u64) -> Result<Option<Device>, Error> {
        self.get_optional(&format!("dcim/devices/{id}/")).await
    }

    /// Keyword search over prefixes.
    ///
    /// `GET /api/ipam/prefixes/?q=<query>`
    pub async fn prefixes_by_query(&self, query: &str) -> Result<Vec<Prefix>, Error> {
        self.get_all("ipam/prefixes/", &[("q", query)]).await
    }
}

// ── Response parsing ─────────────────────────────────────────────────

/// Map status codes onto the error taxonomy, then decode the JSON body.
async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: format!("token rejected (HTTP {status})"),
        });
    }

    if status.is_server_error() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::BackendServer {
            status: status.as_u16(),
            message: preview(&body).to_owned(),
        });
    }

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            message: preview(&body).to_owned(),
        });
    }

    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

fn preview(body: &str) -> &str {
    &body[..body.len().min(200)]
}
