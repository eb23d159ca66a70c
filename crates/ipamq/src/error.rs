//! CLI error types with miette diagnostics.
//!
//! Only invocation-fatal failures live here: bad arguments, unusable
//! configuration, or a backend set that cannot even be constructed.
//! Per-backend query failures are handled inside the dispatcher and
//! surface as warnings, not errors.

use miette::Diagnostic;
use thiserror::Error;

use ipamq_config::ConfigError;
use ipamq_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────

    #[error("Configuration file not found")]
    #[diagnostic(
        code(ipamq::no_config),
        help(
            "Create one listing your backends.\n\
             Expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(ipamq::config))]
    Config(ConfigError),

    #[error("No backends configured")]
    #[diagnostic(
        code(ipamq::no_backends),
        help("Add at least one entry under 'netboxes' or 'phpipams' in the config file.")
    )]
    NoBackends,

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(ipamq::validation))]
    Validation { field: String, reason: String },

    // ── Core ─────────────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(ipamq::backend))]
    Core(#[from] CoreError),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => Self::NoConfig { path },
            other => Self::Config(other),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation { .. } => exit_code::USAGE,
            Self::NoConfig { .. } | Self::Config(_) | Self::NoBackends => exit_code::CONFIG,
            _ => exit_code::GENERAL,
        }
    }
}
