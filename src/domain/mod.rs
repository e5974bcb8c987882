mod entities;
mod errors;
mod ports;

// Re-export the domain boundary types and ports.
pub use entities::{DEFAULT_PRIVILEGES, FileSyncPrivileges, NewUser, Privileges, Tenant, Ticket};
pub use errors::{ClientError, ErrorKind, ProtocolError};
pub use ports::{HttpMethod, Request, Transport, TransportResponse};
