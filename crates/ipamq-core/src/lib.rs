//! Business logic for the ipamq CLI: backend descriptors, the normalized
//! row/table model, per-backend connectors, and the query dispatcher that
//! fans one query out across every configured IPAM instance.

pub mod backend;
pub mod connector;
pub mod dispatch;
pub mod error;
pub mod table;

pub use backend::{BackendDescriptor, BackendKind, NetBoxDescriptor, PhpIpamDescriptor};
pub use dispatch::QueryClient;
pub use error::CoreError;
pub use table::ResultTable;
