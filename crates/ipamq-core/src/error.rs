// ── Core error types ──
//
// Failures that abort an entire invocation, as opposed to per-backend
// query failures: those stay `ipamq_api::Error` and are downgraded to
// warnings at the dispatcher boundary.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A backend client could not be constructed (bad URL, TLS setup).
    #[error("backend '{backend}': {source}")]
    Backend {
        backend: String,
        #[source]
        source: ipamq_api::Error,
    },

    /// Invalid backend configuration reached the core layer.
    #[error("invalid backend configuration: {message}")]
    Config { message: String },
}
