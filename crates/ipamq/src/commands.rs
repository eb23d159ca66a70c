//! Query command handlers: validate the intent value, dispatch across
//! backends, render whatever came back.

use std::net::IpAddr;

use ipnetwork::IpNetwork;

use ipamq_core::QueryClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a query command and print its results.
pub async fn dispatch(
    cmd: Command,
    query: &QueryClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let tables = match cmd {
        Command::Ip { address } => {
            let ip: IpAddr = address.parse().map_err(|_| CliError::Validation {
                field: "address".into(),
                reason: format!("'{address}' is not a valid IP address"),
            })?;
            query.query_ip(ip).await
        }

        Command::Host { query: value } => query.query_host(&value).await,

        Command::Network { query: value } => query.query_network(&value).await,

        Command::Subnet { cidr } => {
            let network: IpNetwork = cidr.parse().map_err(|_| CliError::Validation {
                field: "cidr".into(),
                reason: format!("'{cidr}' is not a valid network in CIDR form"),
            })?;
            query.query_subnet(network).await
        }

        // Completions are handled before dispatch
        Command::Completions { .. } => unreachable!(),
    };

    let color = output::should_color(&global.color);
    let rendered = output::render_tables(&global.output, &tables, color);
    output::print_output(&rendered, global.quiet);
    Ok(())
}
