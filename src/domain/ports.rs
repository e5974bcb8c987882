use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;
use url::Url;

use crate::domain::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Fully built request handed to the transport. Header names are lowercase.
#[derive(Clone)]
pub struct Request {
    pub method: HttpMethod,
    pub uri: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

// Bodies and the authorization header are omitted; both may carry credentials.
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("uri", &self.uri.as_str())
            .field("headers", &header_names)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .finish()
    }
}

// Response handle returned by the transport. Dropping `body` releases the
// underlying connection.
pub struct TransportResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

// The client depends on this trait, not on a concrete HTTP library.
// Implementations must be safe to share between threads.
pub trait Transport: Send + Sync {
    fn execute(&self, request: Request) -> Result<TransportResponse, ClientError>;
}
