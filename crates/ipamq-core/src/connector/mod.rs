//! Backend connectors: one per backend kind, each translating the four
//! query intents into that backend's API calls and mapping responses
//! into normalized result tables.

mod netbox;
mod phpipam;

pub use netbox::NetBoxConnector;
pub use phpipam::PhpIpamConnector;
