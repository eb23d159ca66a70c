// NetBox connector
//
// Maps the four query intents onto NetBox's filter-based REST search
// endpoints and normalizes the records into result tables. "Not found"
// is an empty table, never an error; every row carries a web-UI deep
// link assembled from the instance root URL and the resource ID.

use std::net::IpAddr;
use std::time::Duration;

use ipnetwork::IpNetwork;
use tracing::debug;

use ipamq_api::netbox::models::NamedRef;
use ipamq_api::{Error, NetBoxClient, TlsMode, TransportConfig};

use crate::backend::NetBoxDescriptor;
use crate::error::CoreError;
use crate::table::{ResultTable, schema};

pub struct NetBoxConnector {
    name: String,
    /// Instance root with the trailing slash stripped, for deep links.
    web_base: String,
    client: NetBoxClient,
}

impl NetBoxConnector {
    pub fn new(desc: &NetBoxDescriptor, timeout: Duration) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: TlsMode::from_verify_flag(desc.verify_ssl),
            timeout,
        };
        let client = NetBoxClient::new(desc.url.as_str(), &desc.token, &transport).map_err(|e| {
            CoreError::Backend {
                backend: desc.name.clone(),
                source: e,
            }
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

    /// Web-UI deep link for a resource, e.g. `…/ipam/ip-addresses/17/`.
    fn link(&self, resource: &str, id: u64) -> String {
        format!("{}/{resource}/{id}/", self.web_base)
    }

    // ── Query intents ────────────────────────────────────────────────

    /// Exact-match lookup of an IP address.
    pub async fn query_ip(&self, ip: IpAddr) -> Result<ResultTable, Error> {
        let mut table = ResultTable::new(&self.name, schema::NETBOX_IP);

        for addr in self.client.ip_addresses_by_address(&ip.to_string()).await? {
            table.push_row(vec![
                addr.address.clone(),
                ref_name(addr.tenant.as_ref()),
                addr.dns_name.clone().unwrap_or_default(),
                ref_name(addr.vrf.as_ref()),
                addr.description.clone().unwrap_or_default(),
                self.link("ipam/ip-addresses", addr.id),
            ]);
        }
        Ok(table)
    }

    /// Hosts owning an interface the address is assigned to.
    ///
    /// Each match needs a follow-up device lookup; a failed or empty
    /// lookup skips that row silently.
    pub async fn query_host_by_ip(&self, ip: IpAddr) -> Result<ResultTable, Error> {
        let addresses = self.client.assigned_ip_addresses(&ip.to_string()).await?;
        self.host_rows(addresses).await
    }

    /// Keyword search over devices.
    pub async fn query_host_by_name(&self, name: &str) -> Result<ResultTable, Error> {
        let mut table = ResultTable::new(&self.name, schema::NETBOX_HOST);

        for device in self.client.devices_by_query(name).await? {
            table.push_row(vec![
                device.name.clone().unwrap_or_default(),
                ref_name(device.site.as_ref()),
                ref_name(device.tenant.as_ref()),
                device
                    .primary_ip4
                    .as_ref()
                    .map(|ip| ip.address.clone())
                    .unwrap_or_default(),
                self.link("dcim/devices", device.id),
            ]);
        }
        Ok(table)
    }

    /// Prefix search by compressed CIDR form.
    pub async fn query_network_by_address(&self, network: IpNetwork) -> Result<ResultTable, Error> {
        self.prefix_table(&network.to_string()).await
    }

    /// Prefix search by free-text keyword.
    pub async fn query_network_by_string(&self, query: &str) -> Result<ResultTable, Error> {
        self.prefix_table(query).await
    }

    /// Hosts inside a subnet: interface-assigned addresses whose parent
    /// prefix equals the CIDR, joined to their owning devices.
    pub async fn query_subnet_by_cidr(&self, cidr: IpNetwork) -> Result<ResultTable, Error> {
        let addresses = self
            .client
            .assigned_ip_addresses_in_prefix(&cidr.to_string())
            .await?;
        self.host_rows(addresses).await
    }

    // ── Shared row builders ──────────────────────────────────────────

    async fn host_rows(
        &self,
        addresses: Vec<ipamq_api::netbox::models::IpAddress>,
    ) -> Result<ResultTable, Error> {
        let mut table = ResultTable::new(&self.name, schema::NETBOX_HOST);

        for addr in addresses {
            let Some(device_ref) = addr
                .assigned_object
                .as_ref()
                .and_then(|obj| obj.device.as_ref())
            else {
                continue;
            };

            let device = match self.client.device(device_ref.id).await {
                Ok(Some(device)) => device,
                Ok(None) => continue,
                Err(e) => {
                    debug!(device_id = device_ref.id, error = %e, "device lookup failed, skipping row");
                    continue;
                }
            };

            table.push_row(vec![
                device.name.clone().unwrap_or_default(),
                ref_name(device.site.as_ref()),
                ref_name(device.tenant.as_ref()),
                addr.address.clone(),
                self.link("dcim/devices", device.id),
            ]);
        }
        Ok(table)
    }

    async fn prefix_table(&self, query: &str) -> Result<ResultTable, Error> {
        let mut table = ResultTable::new(&self.name, schema::NETBOX_NETWORK);

        for prefix in self.client.prefixes_by_query(query).await? {
            table.push_row(vec![
                prefix.prefix.clone(),
                ref_name(prefix.tenant.as_ref()),
                ref_name(prefix.vrf.as_ref()),
                prefix.description.clone().unwrap_or_default(),
                self.link("ipam/prefixes", prefix.id),
            ]);
        }
        Ok(table)
    }
}

/// Display name of an optional nested reference, `""` when absent.
fn ref_name(r: Option<&NamedRef>) -> String {
    r.and_then(|r| r.name.clone()).unwrap_or_default()
}
