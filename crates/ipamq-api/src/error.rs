use thiserror::Error;

/// Top-level error type for the `ipamq-api` crate.
///
/// Covers every failure mode across both backend API surfaces:
/// authentication, transport, backend server faults, and payload decoding.
/// `ipamq-core` decides which of these abort a query and which are
/// downgraded to per-backend warnings.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login or token validation failed (wrong credentials, rejected token).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend responses ───────────────────────────────────────────
    /// HTTP 5xx from the backend — their server is broken, not us.
    #[error("Backend server error (HTTP {status}): {message}")]
    BackendServer { status: u16, message: String },

    /// Any other non-success HTTP status or API-level rejection.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error means the backend's server is at fault
    /// (as opposed to bad credentials or a client-side bug).
    pub fn is_server_fault(&self) -> bool {
        matches!(self, Self::BackendServer { .. })
    }

    /// Returns `true` for connection-level failures (refused, DNS, timeout).
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Tls(_) => true,
            _ => false,
        }
    }
}
