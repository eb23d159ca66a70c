// ipamq-api: Async Rust clients for IPAM backend REST APIs (NetBox + phpIPAM)

pub mod error;
pub mod netbox;
pub mod phpipam;
pub mod transport;

pub use error::Error;
pub use netbox::NetBoxClient;
pub use phpipam::{PhpIpamAuth, PhpIpamClient};
pub use transport::{TlsMode, TransportConfig};
