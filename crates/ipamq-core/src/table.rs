// ── Result rows and tables ──
//
// One generic table type parameterized by an explicit column schema per
// query-intent-and-backend-kind combination. No behavior variation, only
// data shape: every row must match the schema's arity, and empty tables
// are filtered out before they reach presentation.

use serde::Serialize;

/// Column schemas, one per intent × backend kind.
///
/// Cell values are always display strings; absent upstream fields
/// normalize to `""`, never to a missing cell.
pub mod schema {
    pub const NETBOX_IP: &[&str] = &["Address", "Tenant", "Hostname", "VRF", "Description", "Link"];
    pub const NETBOX_HOST: &[&str] = &["Device", "Site", "Tenant", "Address", "Link"];
    pub const NETBOX_NETWORK: &[&str] = &["Network", "Tenant", "VRF", "Description", "Link"];
    pub const PHPIPAM_IP: &[&str] = &["Address", "Section", "Hostname", "Description", "Link"];
    pub const PHPIPAM_HOST: &[&str] = &["Hostname", "Section", "Address", "Description", "Link"];
    pub const PHPIPAM_NETWORK: &[&str] = &["Network", "Section", "Description", "Link"];
}

/// An ordered sequence of rows with named columns, tagged with the
/// originating backend's display name.
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    origin: String,
    columns: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn new(origin: impl Into<String>, columns: &'static [&'static str]) -> Self {
        Self {
            origin: origin.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The row's arity must match the column schema.
    pub fn push_row(&mut self, row: Vec<String>) {
        assert_eq!(
            row.len(),
            self.columns.len(),
            "row arity must match the table's column schema"
        );
        self.rows.push(row);
    }

    /// The originating backend's display name.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_row_accepts_matching_arity() {
        let mut table = ResultTable::new("lab", schema::PHPIPAM_NETWORK);
        table.push_row(vec![
            "10.0.0.0/24".into(),
            "Lab".into(),
            "test net".into(),
            "https://ipam.example.com/subnets/1/7/".into(),
        ]);
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }

    #[test]
    #[should_panic(expected = "row arity")]
    fn push_row_rejects_wrong_arity() {
        let mut table = ResultTable::new("lab", schema::NETBOX_IP);
        table.push_row(vec!["10.0.0.1/32".into()]);
    }

    #[test]
    fn serializes_with_origin_and_columns() {
        let mut table = ResultTable::new("prod", schema::PHPIPAM_NETWORK);
        table.push_row(vec!["10.1.0.0/16".into(), "DC".into(), String::new(), "x".into()]);

        let json = serde_json::to_value(&table).expect("serializable");
        assert_eq!(json["origin"], "prod");
        assert_eq!(json["columns"][1], "Section");
        assert_eq!(json["rows"][0][0], "10.1.0.0/16");
    }
}
