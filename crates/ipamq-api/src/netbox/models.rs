// NetBox API response types
//
// Models for the NetBox REST API (DRF). List endpoints wrap their payload
// in the `Page<T>` envelope. Fields use `#[serde(default)]` liberally
// because optional relations come back as `null` rather than being omitted.

use serde::Deserialize;

// ── Pagination envelope ──────────────────────────────────────────────

/// Standard DRF page envelope returned by every NetBox list endpoint.
///
/// ```json
/// { "count": 42, "next": "https://…?offset=50", "previous": null, "results": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

// ── Nested references ────────────────────────────────────────────────

/// Brief nested representation of a related object (VRF, tenant, site, …).
#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Brief nested device reference inside an assigned object.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRef {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// The interface (or similar) an IP address is assigned to. Only the
/// owning device matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignedObject {
    #[serde(default)]
    pub device: Option<DeviceRef>,
}

/// Brief nested IP reference (`primary_ip4` on a device).
#[derive(Debug, Clone, Deserialize)]
pub struct IpRef {
    pub address: String,
}

// ── Resources ────────────────────────────────────────────────────────

/// IP address record from `/api/ipam/ip-addresses/`.
#[derive(Debug, Clone, Deserialize)]
pub struct IpAddress {
    pub id: u64,
    pub address: String,
    #[serde(default)]
    pub dns_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vrf: Option<NamedRef>,
    #[serde(default)]
    pub tenant: Option<NamedRef>,
    #[serde(default)]
    pub assigned_object: Option<AssignedObject>,
}

/// Device record from `/api/dcim/devices/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Device {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub site: Option<NamedRef>,
    #[serde(default)]
    pub tenant: Option<NamedRef>,
    #[serde(default)]
    pub primary_ip4: Option<IpRef>,
}

/// Prefix record from `/api/ipam/prefixes/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Prefix {
    pub id: u64,
    pub prefix: String,
    #[serde(default)]
    pub vrf: Option<NamedRef>,
    #[serde(default)]
    pub tenant: Option<NamedRef>,
    #[serde(default)]
    pub description: Option<String>,
}
