// Interface adapters: wire payloads and the HTTP transport.

pub mod clients;
pub mod protocol;

pub use clients::{ReqwestTransport, ReqwestTransportError, TransportConfig};
