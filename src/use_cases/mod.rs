// Use cases layer: the directory protocol workflows and their building blocks.

pub mod directory;
pub mod envelope;
pub mod request_builder;
pub mod stream_collector;

#[cfg(test)]
pub(crate) mod test_support;

pub use directory::{DirectoryServiceClient, Endpoints, SERVICE_BASE_PATH, service_root};
pub use envelope::{ResponseEnvelope, validate};
pub use request_builder::RequestBuilder;
pub use stream_collector::{DEFAULT_CHUNK_SIZE, StreamCollector, md5_hex};
