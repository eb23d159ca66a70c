//! Clap derive structures for the `ipamq` CLI.
//!
//! Four query subcommands plus shell completion generation, with global
//! flags shared across all of them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// ipamq -- query multiple IPAM backends from one command line
#[derive(Debug, Parser)]
#[command(
    name = "ipamq",
    version,
    about = "Query NetBox and phpIPAM instances for IPs, hosts, and networks",
    long_about = "Fans a single query out across every configured IPAM backend\n\
        and renders the merged results as tables, one per backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Path to the config file
    #[arg(long, short = 'c', env = "IPAMQ_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', env = "IPAMQ_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds, per backend call
    #[arg(long, env = "IPAMQ_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one deep link per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query backends for an IP address
    Ip {
        /// IP address to look up
        address: String,
    },

    /// Query backends for a host by name or IP address
    Host {
        /// Host name (substring search) or literal IP address
        query: String,
    },

    /// Query backends for a network by CIDR or free text
    Network {
        /// Network in CIDR form, or text matched against descriptions
        query: String,
    },

    /// Enumerate the hosts inside a subnet (NetBox backends only)
    Subnet {
        /// Subnet in CIDR form
        cidr: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}
