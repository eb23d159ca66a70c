// ── Backend descriptors ──
//
// Typed connection configuration for one IPAM instance. Descriptors are
// immutable: constructed once from configuration, never mutated. The
// closed `BackendDescriptor` variant is the single place backend kinds
// are enumerated — capability differences hang off `BackendKind`, not
// off runtime branches elsewhere.

use secrecy::SecretString;
use url::Url;

pub use ipamq_api::PhpIpamAuth;

/// The two supported backend kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    NetBox,
    PhpIpam,
}

impl BackendKind {
    /// Whether this kind can enumerate the hosts inside a subnet.
    ///
    /// phpIPAM has no device/interface assignment concept, so the subnet
    /// intent is NetBox-only.
    pub fn supports_subnet_query(self) -> bool {
        matches!(self, Self::NetBox)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NetBox => "netbox",
            Self::PhpIpam => "phpipam",
        }
    }
}

/// Connection parameters for one NetBox instance.
#[derive(Debug, Clone)]
pub struct NetBoxDescriptor {
    /// Display name, used as the result-table origin label.
    pub name: String,
    /// Instance root URL.
    pub url: Url,
    /// Static API token.
    pub token: SecretString,
    pub verify_ssl: bool,
}

/// Connection parameters for one phpIPAM instance.
#[derive(Debug, Clone)]
pub struct PhpIpamDescriptor {
    pub name: String,
    pub url: Url,
    /// API application context selector.
    pub app_id: String,
    /// Exactly one credential path — enforced at config load time.
    pub auth: PhpIpamAuth,
    pub verify_ssl: bool,
}

/// A configured backend instance of either kind.
#[derive(Debug, Clone)]
pub enum BackendDescriptor {
    NetBox(NetBoxDescriptor),
    PhpIpam(PhpIpamDescriptor),
}

impl BackendDescriptor {
    /// The backend's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::NetBox(d) => &d.name,
            Self::PhpIpam(d) => &d.name,
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::NetBox(_) => BackendKind::NetBox,
            Self::PhpIpam(_) => BackendKind::PhpIpam,
        }
    }
}
