pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::{ClientError, ErrorKind, NewUser, ProtocolError, Tenant, Ticket};
pub use interface_adapters::{ReqwestTransport, TransportConfig};
pub use use_cases::{DirectoryServiceClient, StreamCollector, service_root};
