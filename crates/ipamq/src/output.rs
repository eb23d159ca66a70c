//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders result tables in the format selected by `--output`. Table
//! rendering uses `tabled`'s builder (our column sets vary per query
//! intent and backend kind); structured formats serialize the tables
//! via serde; plain emits one deep link per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::builder::Builder;
use tabled::settings::Style;

use ipamq_core::ResultTable;

use crate::cli::{ColorMode, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Render dispatcher ────────────────────────────────────────────────

/// Render the full result set in the chosen format.
pub fn render_tables(format: &OutputFormat, tables: &[ResultTable], color: bool) -> String {
    match format {
        OutputFormat::Table => tables
            .iter()
            .map(|t| render_table(t, color))
            .collect::<Vec<_>>()
            .join("\n\n"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(tables).expect("serialization should not fail")
        }
        OutputFormat::JsonCompact => {
            serde_json::to_string(tables).expect("serialization should not fail")
        }
        OutputFormat::Yaml => serde_yaml::to_string(tables).expect("serialization should not fail"),
        OutputFormat::Plain => tables
            .iter()
            .flat_map(|t| t.rows().iter().filter_map(|row| row.last()))
            .cloned()
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Table renderer ───────────────────────────────────────────────────

/// One titled table per backend: the origin label above, the rows below.
fn render_table(table: &ResultTable, color: bool) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().copied());
    for row in table.rows() {
        builder.push_record(row.iter().map(String::as_str));
    }
    let rendered = builder.build().with(Style::rounded()).to_string();

    let title = if color {
        table.origin().bold().underline().to_string()
    } else {
        table.origin().to_string()
    };
    format!("{title}\n{rendered}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipamq_core::table::schema;

    fn sample() -> ResultTable {
        let mut table = ResultTable::new("lab", schema::PHPIPAM_NETWORK);
        table.push_row(vec![
            "10.0.0.0/24".into(),
            "Lab".into(),
            "office".into(),
            "https://ipam.example.com/subnets/1/7/".into(),
        ]);
        table
    }

    #[test]
    fn table_output_carries_origin_and_headers() {
        let out = render_tables(&OutputFormat::Table, &[sample()], false);
        assert!(out.starts_with("lab\n"));
        assert!(out.contains("Network"));
        assert!(out.contains("10.0.0.0/24"));
    }

    #[test]
    fn plain_output_is_one_link_per_row() {
        let out = render_tables(&OutputFormat::Plain, &[sample(), sample()], false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "https://ipam.example.com/subnets/1/7/");
    }

    #[test]
    fn json_output_round_trips() {
        let out = render_tables(&OutputFormat::JsonCompact, &[sample()], false);
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(parsed[0]["origin"], "lab");
    }
}
