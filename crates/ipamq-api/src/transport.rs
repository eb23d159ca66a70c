// Shared transport configuration for building reqwest::Client instances.
//
// Both backend clients share TLS and timeout settings through this module,
// avoiding duplicated builder logic.

use std::time::Duration;

/// TLS verification mode.
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Accept any certificate (for self-signed IPAM installations).
    DangerAcceptInvalid,
}

impl TlsMode {
    /// Map a config-level `verify_ssl` flag to a TLS mode.
    pub fn from_verify_flag(verify: bool) -> Self {
        if verify {
            Self::System
        } else {
            Self::DangerAcceptInvalid
        }
    }
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        self.builder()
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    /// Build a `reqwest::Client` with additional default headers.
    ///
    /// Used by the NetBox client to inject the `Authorization` header.
    pub fn build_client_with_headers(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, crate::error::Error> {
        self.builder()
            .default_headers(headers)
            .build()
            .map_err(|e| crate::error::Error::Tls(format!("failed to build HTTP client: {e}")))
    }

    fn builder(&self) -> reqwest::ClientBuilder {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("ipamq/", env!("CARGO_PKG_VERSION")));

        if matches!(self.tls, TlsMode::DangerAcceptInvalid) {
            builder = builder.danger_accept_invalid_certs(true);
        }

        builder
    }
}
