//! Configuration for the ipamq CLI.
//!
//! A config document lists zero or more NetBox and phpIPAM backend
//! descriptors. YAML and JSON are both accepted (chosen by file suffix).
//! Validation happens at load time: a descriptor that cannot resolve
//! exactly one usable credential path is rejected before any query runs.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use ipamq_core::backend::{
    BackendDescriptor, NetBoxDescriptor, PhpIpamAuth, PhpIpamDescriptor,
};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {path} does not exist")]
    NotFound { path: String },

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("backend '{backend}': {reason}")]
    Validation { backend: String, reason: String },
}

// ── Config document ─────────────────────────────────────────────────

/// Top-level config document: one list of descriptors per backend kind.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub netboxes: Vec<NetBoxConfig>,
    #[serde(default)]
    pub phpipams: Vec<PhpIpamConfig>,
}

/// One NetBox instance.
#[derive(Debug, Deserialize)]
pub struct NetBoxConfig {
    pub name: String,
    pub url: String,
    pub token: String,
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

/// One phpIPAM instance. Either `token` or `username` + `password` must
/// be set — exactly one credential path.
#[derive(Debug, Deserialize)]
pub struct PhpIpamConfig {
    pub name: String,
    pub url: String,
    pub app_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

fn default_true() -> bool {
    true
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions,
/// e.g. `~/.config/ipamq/config.yml`.
pub fn default_config_path() -> PathBuf {
    ProjectDirs::from("com", "ipamq", "ipamq").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("ipamq");
            p.push("config.yml");
            p
        },
        |dirs| dirs.config_dir().join("config.yml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load and parse a config document. `.yml`/`.yaml` files parse as YAML,
/// everything else as JSON.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.display().to_string(),
        });
    }

    let raw = std::fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    let config = if is_yaml {
        serde_yaml::from_str(&raw)?
    } else {
        serde_json::from_str(&raw)?
    };
    Ok(config)
}

// ── Descriptor conversion + validation ──────────────────────────────

impl Config {
    /// Convert the parsed document into validated backend descriptors,
    /// NetBox instances first, in document order.
    pub fn descriptors(&self) -> Result<Vec<BackendDescriptor>, ConfigError> {
        let mut out = Vec::with_capacity(self.netboxes.len() + self.phpipams.len());

        for nb in &self.netboxes {
            out.push(BackendDescriptor::NetBox(NetBoxDescriptor {
                name: nb.name.clone(),
                url: parse_url(&nb.name, &nb.url)?,
                token: SecretString::from(nb.token.clone()),
                verify_ssl: nb.verify_ssl,
            }));
        }

        for php in &self.phpipams {
            out.push(BackendDescriptor::PhpIpam(PhpIpamDescriptor {
                name: php.name.clone(),
                url: parse_url(&php.name, &php.url)?,
                app_id: php.app_id.clone(),
                auth: php.resolve_auth()?,
                verify_ssl: php.verify_ssl,
            }));
        }

        Ok(out)
    }
}

impl PhpIpamConfig {
    /// Enforce the "exactly one credential path" invariant.
    fn resolve_auth(&self) -> Result<PhpIpamAuth, ConfigError> {
        match (&self.token, &self.username, &self.password) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(self.invalid(
                "both a token and username/password are set; configure exactly one",
            )),
            (Some(token), None, None) => Ok(PhpIpamAuth::Token(SecretString::from(token.clone()))),
            (None, Some(username), Some(password)) => Ok(PhpIpamAuth::Credentials {
                username: username.clone(),
                password: SecretString::from(password.clone()),
            }),
            (None, Some(_), None) | (None, None, Some(_)) => {
                Err(self.invalid("username and password must be configured together"))
            }
            (None, None, None) => {
                Err(self.invalid("no credentials: set either a token or username and password"))
            }
        }
    }

    fn invalid(&self, reason: &str) -> ConfigError {
        ConfigError::Validation {
            backend: self.name.clone(),
            reason: reason.into(),
        }
    }
}

fn parse_url(backend: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Validation {
        backend: backend.into(),
        reason: format!("invalid url '{raw}': {e}"),
    })
}

// ── Tests ───────────────────────────────────────────────────────────
