// phpIPAM API response types
//
// Every phpIPAM response is wrapped in the `Envelope<T>` shape. Numeric
// identifiers are modeled as strings because the API serializes them as
// JSON strings ("subnetId": "7").

use serde::Deserialize;

// ── Response envelope ────────────────────────────────────────────────

/// Standard phpIPAM response envelope.
///
/// ```json
/// { "code": 200, "success": true, "data": [...] }
/// ```
///
/// On failure `success` is `false` and `message` carries the reason;
/// `data` is absent.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Auth ─────────────────────────────────────────────────────────────

/// Payload of a successful `POST /user/` token exchange.
#[derive(Debug, Deserialize)]
pub struct TokenData {
    pub token: String,
}

// ── Resources ────────────────────────────────────────────────────────

/// Address record from the address search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Address {
    pub id: String,
    #[serde(rename = "subnetId")]
    pub subnet_id: String,
    pub ip: String,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Subnet record from `/subnets/…`.
#[derive(Debug, Clone, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub subnet: String,
    pub mask: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "sectionId")]
    pub section_id: String,
}

/// Section record from `/sections/<id>/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
}
