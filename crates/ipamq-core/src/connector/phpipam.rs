// phpIPAM connector
//
// Same query intents against phpIPAM's REST API, with two extra moving
// parts: session establishment (token or login exchange) before the
// first call, and a section join per matched record. The join result is
// cached per query invocation, keyed by subnet ID, so multiple matches
// in the same subnet cost one lookup.
//
// phpIPAM has no device concept, so host-by-ip is the same search as the
// ip intent, and the subnet intent does not exist here at all.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;

use ipnetwork::IpNetwork;
use tracing::warn;

use ipamq_api::phpipam::models::Address;
use ipamq_api::{Error, PhpIpamClient, TlsMode, TransportConfig};

use crate::backend::PhpIpamDescriptor;
use crate::error::CoreError;
use crate::table::{ResultTable, schema};

/// Request-scoped section join cache: subnet ID → (section ID, section name).
type SectionCache = HashMap<String, (String, String)>;

pub struct PhpIpamConnector {
    name: String,
    /// Instance root with the trailing slash stripped, for deep links.
    web_base: String,
    client: PhpIpamClient,
}

impl PhpIpamConnector {
    pub fn new(desc: &PhpIpamDescriptor, timeout: Duration) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: TlsMode::from_verify_flag(desc.verify_ssl),
            timeout,
        };
        let client = PhpIpamClient::new(
            desc.url.as_str(),
            &desc.app_id,
            desc.auth.clone(),
            &transport,
        )
        .map_err(|e| CoreError::Backend {
            backend: desc.name.clone(),
            source: e,
        })?;

        Ok(Self {
            name: desc.name.clone(),
            web_base: desc.url.as_str().trim_end_matches('/').to_owned(),
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn link(&self, path: &str) -> String {
        format!("{}/{}", self.web_base, path.trim_start_matches('/'))
    }

    // ── Query intents ────────────────────────────────────────────────

    /// Search addresses by value. A 404 from the search endpoint is zero
    /// results, handled inside the client.
    pub async fn query_ip(&self, ip: IpAddr) -> Result<ResultTable, Error> {
        self.client.ensure_session().await?;

        let mut cache = SectionCache::new();
        let mut table = ResultTable::new(&self.name, schema::PHPIPAM_IP);

        for addr in self.client.search_addresses(&ip.to_string()).await? {
            let (section_id, section_name) = self.section_join(&mut cache, &addr.subnet_id).await?;
            table.push_row(vec![
                addr.ip.clone(),
                section_name,
                addr.hostname.clone().unwrap_or_default(),
                addr.description.clone().unwrap_or_default(),
                self.address_link(&section_id, &addr),
            ]);
        }
        Ok(table)
    }

    /// phpIPAM has no separate device concept; host-by-ip is the address
    /// search.
    pub async fn query_host_by_ip(&self, ip: IpAddr) -> Result<ResultTable, Error> {
        self.query_ip(ip).await
    }

    /// Search addresses by hostname.
    pub async fn query_host_by_name(&self, name: &str) -> Result<ResultTable, Error> {
        self.client.ensure_session().await?;

        let mut cache = SectionCache::new();
        let mut table = ResultTable::new(&self.name, schema::PHPIPAM_HOST);

        for addr in self.client.search_hostnames(name).await? {
            let (section_id, section_name) = self.section_join(&mut cache, &addr.subnet_id).await?;
            table.push_row(vec![
                addr.hostname.clone().unwrap_or_default(),
                section_name,
                addr.ip.clone(),
                addr.description.clone().unwrap_or_default(),
                self.address_link(&section_id, &addr),
            ]);
        }
        Ok(table)
    }

    /// Subnet search by CIDR. The displayed network is `subnet/mask`.
    pub async fn query_network_by_address(&self, network: IpNetwork) -> Result<ResultTable, Error> {
        self.client.ensure_session().await?;

        let mut cache = SectionCache::new();
        let mut table = ResultTable::new(&self.name, schema::PHPIPAM_NETWORK);

        for subnet in self.client.search_subnets(&network.to_string()).await? {
            let (section_id, section_name) = self.section_join(&mut cache, &subnet.id).await?;
            table.push_row(vec![
                format!("{}/{}", subnet.subnet, subnet.mask),
                section_name,
                subnet.description.clone().unwrap_or_default(),
                self.link(&format!("subnets/{section_id}/{}/", subnet.id)),
            ]);
        }
        Ok(table)
    }

    /// Free-text network search: list all subnets, filter client-side on
    /// the description as a case-insensitive substring.
    ///
    /// phpIPAM installations are known to 500 on the subnet listing; that
    /// is their server's problem, so it degrades to an empty table with a
    /// warning instead of failing the backend.
    pub async fn query_network_by_string(&self, query: &str) -> Result<ResultTable, Error> {
        self.client.ensure_session().await?;

        let mut table = ResultTable::new(&self.name, schema::PHPIPAM_NETWORK);

        let subnets = match self.client.list_subnets().await {
            Ok(subnets) => subnets,
            Err(e) if e.is_server_fault() => {
                warn!(
                    backend = %self.name,
                    "subnet listing failed with a server-side error; check the phpIPAM server error log"
                );
                return Ok(table);
            }
            Err(e) => return Err(e),
        };

        let needle = query.to_lowercase();
        let mut cache = SectionCache::new();

        for subnet in subnets {
            let matched = subnet
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !matched {
                continue;
            }

            let (section_id, section_name) = self.section_join(&mut cache, &subnet.id).await?;
            table.push_row(vec![
                format!("{}/{}", subnet.subnet, subnet.mask),
                section_name,
                subnet.description.clone().unwrap_or_default(),
                self.link(&format!("subnets/{section_id}/{}/", subnet.id)),
            ]);
        }
        Ok(table)
    }

    // ── Section join ─────────────────────────────────────────────────

    /// Resolve a subnet's owning section: subnet → `sectionId` → section
    /// name. Cached per query invocation.
    async fn section_join(
        &self,
        cache: &mut SectionCache,
        subnet_id: &str,
    ) -> Result<(String, String), Error> {
        if let Some(hit) = cache.get(subnet_id) {
            return Ok(hit.clone());
        }

        let subnet = self.client.subnet(subnet_id).await?;
        let section = self.client.section(&subnet.section_id).await?;

        let entry = (section.id, section.name);
        cache.insert(subnet_id.to_owned(), entry.clone());
        Ok(entry)
    }

    fn address_link(&self, section_id: &str, addr: &Address) -> String {
        self.link(&format!(
            "subnets/{section_id}/{}/address-details/{}",
            addr.subnet_id, addr.id
        ))
    }
}
