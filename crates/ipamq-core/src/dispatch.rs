// ── Query dispatch ──
//
// The single orchestration point invoked once per CLI command. Fans a
// query out across every configured backend concurrently, so total
// latency is bounded by the slowest backend rather than the sum. One
// backend's failure never blocks the others: errors are logged at warn
// level and that backend's contribution is dropped for the call. Empty
// tables are filtered out before the result reaches presentation.

use std::net::IpAddr;
use std::time::Duration;

use futures_util::future::join_all;
use ipnetwork::IpNetwork;
use tracing::warn;

use crate::backend::{BackendDescriptor, BackendKind};
use crate::connector::{NetBoxConnector, PhpIpamConnector};
use crate::error::CoreError;
use crate::table::ResultTable;

/// A constructed backend adapter of either kind. The exhaustive dispatch
/// over backend kinds lives here and nowhere else.
enum Connector {
    NetBox(NetBoxConnector),
    PhpIpam(PhpIpamConnector),
}

impl Connector {
    fn name(&self) -> &str {
        match self {
            Self::NetBox(c) => c.name(),
            Self::PhpIpam(c) => c.name(),
        }
    }

    fn kind(&self) -> BackendKind {
        match self {
            Self::NetBox(_) => BackendKind::NetBox,
            Self::PhpIpam(_) => BackendKind::PhpIpam,
        }
    }

    fn supports_subnet_query(&self) -> bool {
        self.kind().supports_subnet_query()
    }

    async fn query_ip(&self, ip: IpAddr) -> Result<ResultTable, ipamq_api::Error> {
        match self {
            Self::NetBox(c) => c.query_ip(ip).await,
            Self::PhpIpam(c) => c.query_ip(ip).await,
        }
    }

    async fn query_host_by_ip(&self, ip: IpAddr) -> Result<ResultTable, ipamq_api::Error> {
        match self {
            Self::NetBox(c) => c.query_host_by_ip(ip).await,
            Self::PhpIpam(c) => c.query_host_by_ip(ip).await,
        }
    }

    async fn query_host_by_name(&self, name: &str) -> Result<ResultTable, ipamq_api::Error> {
        match self {
            Self::NetBox(c) => c.query_host_by_name(name).await,
            Self::PhpIpam(c) => c.query_host_by_name(name).await,
        }
    }

    async fn query_network_by_address(
        &self,
        network: IpNetwork,
    ) -> Result<ResultTable, ipamq_api::Error> {
        match self {
            Self::NetBox(c) => c.query_network_by_address(network).await,
            Self::PhpIpam(c) => c.query_network_by_address(network).await,
        }
    }

    async fn query_network_by_string(&self, query: &str) -> Result<ResultTable, ipamq_api::Error> {
        match self {
            Self::NetBox(c) => c.query_network_by_string(query).await,
            Self::PhpIpam(c) => c.query_network_by_string(query).await,
        }
    }

    /// Only meaningful for kinds where `supports_subnet_query` is true;
    /// the dispatcher never routes the subnet intent elsewhere.
    async fn query_subnet_by_cidr(&self, cidr: IpNetwork) -> Result<ResultTable, ipamq_api::Error> {
        match self {
            Self::NetBox(c) => c.query_subnet_by_cidr(cidr).await,
            Self::PhpIpam(_) => {
                unreachable!("subnet intent dispatched to a backend kind that does not support it")
            }
        }
    }
}

/// Dispatches one query across all configured backends.
pub struct QueryClient {
    connectors: Vec<Connector>,
}

impl QueryClient {
    /// Build one adapter per descriptor, preserving configuration order —
    /// results come back in the same order. Each adapter derives its own
    /// TLS mode from its descriptor; `timeout` applies to every outbound
    /// call on every backend.
    pub fn new(descriptors: &[BackendDescriptor], timeout: Duration) -> Result<Self, CoreError> {
        let connectors = descriptors
            .iter()
            .map(|descriptor| match descriptor {
                BackendDescriptor::NetBox(d) => {
                    NetBoxConnector::new(d, timeout).map(Connector::NetBox)
                }
                BackendDescriptor::PhpIpam(d) => {
                    PhpIpamConnector::new(d, timeout).map(Connector::PhpIpam)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { connectors })
    }

    /// Number of configured backends.
    pub fn backend_count(&self) -> usize {
        self.connectors.len()
    }

    // ── Intents ──────────────────────────────────────────────────────

    /// `ip <address>` — exact address lookup on every backend.
    pub async fn query_ip(&self, ip: IpAddr) -> Vec<ResultTable> {
        let futs = self
            .connectors
            .iter()
            .map(|c| async move { (c.name(), c.query_ip(ip).await) });
        gather(join_all(futs).await)
    }

    /// `host <query>` — an IP-shaped value searches by assigned address,
    /// anything else falls back to a name search.
    pub async fn query_host(&self, raw: &str) -> Vec<ResultTable> {
        match raw.parse::<IpAddr>() {
            Ok(ip) => {
                let futs = self
                    .connectors
                    .iter()
                    .map(|c| async move { (c.name(), c.query_host_by_ip(ip).await) });
                gather(join_all(futs).await)
            }
            Err(_) => {
                let futs = self
                    .connectors
                    .iter()
                    .map(|c| async move { (c.name(), c.query_host_by_name(raw).await) });
                gather(join_all(futs).await)
            }
        }
    }

    /// `network <query>` — a CIDR-shaped value searches by address,
    /// anything else falls back to a free-text search.
    pub async fn query_network(&self, raw: &str) -> Vec<ResultTable> {
        match raw.parse::<IpNetwork>() {
            Ok(network) => {
                let futs = self.connectors.iter().map(|c| async move {
                    (c.name(), c.query_network_by_address(network).await)
                });
                gather(join_all(futs).await)
            }
            Err(_) => {
                let futs = self
                    .connectors
                    .iter()
                    .map(|c| async move { (c.name(), c.query_network_by_string(raw).await) });
                gather(join_all(futs).await)
            }
        }
    }

    /// `subnet <cidr>` — host enumeration inside a subnet, routed only to
    /// backend kinds that support it.
    pub async fn query_subnet(&self, cidr: IpNetwork) -> Vec<ResultTable> {
        let futs = self
            .connectors
            .iter()
            .filter(|c| c.supports_subnet_query())
            .map(|c| async move { (c.name(), c.query_subnet_by_cidr(cidr).await) });
        gather(join_all(futs).await)
    }
}

/// Keep non-empty tables in backend order; log and drop failures.
fn gather(results: Vec<(&str, Result<ResultTable, ipamq_api::Error>)>) -> Vec<ResultTable> {
    let mut tables = Vec::new();
    for (backend, result) in results {
        match result {
            Ok(table) => {
                if !table.is_empty() {
                    tables.push(table);
                }
            }
            Err(e) if e.is_server_fault() => {
                warn!(backend, error = %e, "backend reported a server-side error, skipping it");
            }
            Err(e) => {
                warn!(backend, error = %e, "backend query failed, skipping it");
            }
        }
    }
    tables
}
