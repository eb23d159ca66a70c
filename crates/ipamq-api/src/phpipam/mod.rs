// phpIPAM API HTTP client
//
// Wraps `reqwest::Client` with the `{url}/api/{app_id}/` base path,
// envelope unwrapping, and session management. The session token is
// resolved once per client — either a static token from config or a
// username/password exchange against `POST /user/` — and sent as the
// `phpipam-token` header on every data call.

pub mod models;

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use models::{Address, Envelope, Section, Subnet, TokenData};

/// How a phpIPAM client authenticates.
#[derive(Debug, Clone)]
pub enum PhpIpamAuth {
    /// Static API token from configuration.
    Token(SecretString),
    /// Username/password pair, exchanged for a token on first use.
    Credentials {
        username: String,
        password: SecretString,
    },
}

/// Async client for the phpIPAM REST API.
///
/// All data endpoints live under `{url}/api/{app_id}/` and require the
/// `phpipam-token` header. Call [`ensure_session`](Self::ensure_session)
/// before the first data call; it is idempotent and cheap once the token
/// is resolved.
pub struct PhpIpamClient {
    http: reqwest::Client,
    api_base: Url,
    auth: PhpIpamAuth,
    /// Resolved session token, held for the process lifetime. There is no
    /// refresh-on-expiry: a 401 mid-query fails that query.
    token: RwLock<Option<String>>,
}

impl PhpIpamClient {
    /// Build a client from the instance root URL, API application ID, and
    /// credentials. No network traffic happens here — the session is
    /// established lazily by `ensure_session`.
    pub fn new(
        base_url: &str,
        app_id: &str,
        auth: PhpIpamAuth,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base = base_url.trim_end_matches('/');
        let api_base = Url::parse(&format!("{base}/api/{app_id}/"))?;

        Ok(Self {
            http,
            api_base,
            auth,
            token: RwLock::new(None),
        })
    }

    // ── Session ──────────────────────────────────────────────────────

    /// Resolve the session token if it hasn't been resolved yet.
    ///
    /// With a static token this never touches the network. With
    /// username/password it performs exactly one `POST /user/` exchange;
    /// subsequent calls reuse the stored token.
    pub async fn ensure_session(&self) -> Result<(), Error> {
        if self
            .token
            .read()
            .expect("token lock poisoned")
            .is_some()
        {
            return Ok(());
        }

        let token = match &self.auth {
            PhpIpamAuth::Token(token) => token.expose_secret().to_owned(),
            PhpIpamAuth::Credentials { username, password } => {
                self.login(username, password).await?
            }
        };

        *self.token.write().expect("token lock poisoned") = Some(token);
        Ok(())
    }

    /// Exchange username/password for a session token.
    ///
    /// `POST /user/` with HTTP basic auth. The envelope reports failure
    /// with `success: false` even on some 2xx responses, so both the HTTP
    /// status and the flag are checked.
    async fn login(&self, username: &str, password: &SecretString) -> Result<String, Error> {
        let url = self.api_url("user/");
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .basic_auth(username, Some(password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {}", preview(&body)),
            });
        }

        let envelope: Envelope<TokenData> = decode(resp).await?;
        if !envelope.success {
            return Err(Error::Authentication {
                message: envelope
                    .message
                    .unwrap_or_else(|| "invalid credentials".into()),
            });
        }

        envelope
            .data
            .map(|d| d.token)
            .ok_or_else(|| Error::Authentication {
                message: "login response carried no token".into(),
            })
    }

    fn session_token(&self) -> Result<String, Error> {
        self.token
            .read()
            .expect("token lock poisoned")
            .clone()
            .ok_or_else(|| Error::Authentication {
                message: "session not established — call ensure_session first".into(),
            })
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path onto `{url}/api/{app_id}/`.
    fn api_url(&self, path: &str) -> Url {
        self.api_base
            .join(path.trim_start_matches('/'))
            .expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a search/list endpoint and unwrap the envelope.
    ///
    /// A 404 from these endpoints means "nothing matched", not an error,
    /// and yields an empty vec.
    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, Error> {
        let url = self.api_url(path);
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header("phpipam-token", self.session_token()?)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        check_status(status)?;

        let envelope: Envelope<Vec<T>> = decode(resp).await?;
        if !envelope.success {
            return Err(Error::Api {
                status: envelope.code,
                message: envelope.message.unwrap_or_else(|| "request failed".into()),
            });
        }
        Ok(envelope.data.unwrap_or_default())
    }

    /// GET a single-object endpoint and unwrap the envelope.
    async fn get_object<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path);
        debug!("GET {url}");

        let resp = self
            .http
            .get(url)
            .header("phpipam-token", self.session_token()?)
            .send()
            .await
            .map_err(Error::Transport)?;

        check_status(resp.status())?;

        let envelope: Envelope<T> = decode(resp).await?;
        if !envelope.success {
            return Err(Error::Api {
                status: envelope.code,
                message: envelope.message.unwrap_or_else(|| "request failed".into()),
            });
        }
        envelope.data.ok_or_else(|| Error::Api {
            status: envelope.code,
            message: "response carried no data".into(),
        })
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Search addresses by value.
    ///
    /// `GET /addresses/search/<ip>/`
    pub async fn search_addresses(&self, ip: &str) -> Result<Vec<Address>, Error> {
        self.get_list(&format!("addresses/search/{ip}/")).await
    }

    /// Search addresses by hostname.
    ///
    /// `GET /addresses/search_hostbase/<name>/`
    pub async fn search_hostnames(&self, name: &str) -> Result<Vec<Address>, Error> {
        self.get_list(&format!("addresses/search_hostbase/{name}/"))
            .await
    }

    /// Search subnets by CIDR.
    ///
    /// `GET /subnets/search/<cidr>/`
    pub async fn search_subnets(&self, cidr: &str) -> Result<Vec<Subnet>, Error> {
        self.get_list(&format!("subnets/search/{cidr}/")).await
    }

    /// List all subnets.
    ///
    /// `GET /subnets/` — a 500 here is a known phpIPAM server-side failure
    /// mode and surfaces as `Error::BackendServer`.
    pub async fn list_subnets(&self) -> Result<Vec<Subnet>, Error> {
        self.get_list("subnets/").await
    }

    /// Fetch a single subnet by ID.
    ///
    /// `GET /subnets/<id>/`
    pub async fn subnet(&self, id: &str) -> Result<Subnet, Error> {
        self.get_object(&format!("subnets/{id}/")).await
    }

    /// Fetch a single section by ID.
    ///
    /// `GET /sections/<id>/`
    pub async fn section(&self, id: &str) -> Result<Section, Error> {
        self.get_object(&format!("sections/{id}/")).await
    }
}

// ── Response parsing ─────────────────────────────────────────────────

/// Reject auth and server-fault statuses before touching the body.
fn check_status(status: reqwest::StatusCode) -> Result<(), Error> {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(Error::Authentication {
            message: format!("token rejected (HTTP {status})"),
        });
    }
    if status.is_server_error() {
        return Err(Error::BackendServer {
            status: status.as_u16(),
            message: "phpIPAM reported an internal error".into(),
        });
    }
    if !status.is_success() {
        return Err(Error::Api {
            status: status.as_u16(),
            message: format!("unexpected HTTP status {status}"),
        });
    }
    Ok(())
}

/// Decode a JSON body, keeping a preview for diagnostics.
async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let body = resp.text().await.map_err(Error::Transport)?;
    serde_json::from_str(&body).map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(&body)),
        body,
    })
}

fn preview(body: &str) -> &str {
    &body[..body.len().min(200)]
}
