use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::fmt;
use std::time::Duration;
use url::Url;

use crate::domain::{ClientError, HttpMethod, Request, Transport, TransportResponse};
use crate::use_cases::DirectoryServiceClient;

// Transport settings the directory client does not decide for itself.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    // Trust self-signed or otherwise unverifiable certificates.
    pub accept_invalid_certs: bool,
    // Upper bound for a whole request; None blocks until the server answers.
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub enum ReqwestTransportError {
    InvalidHeader { name: String },
    Send(reqwest::Error),
}

impl fmt::Display for ReqwestTransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReqwestTransportError::InvalidHeader { name } => {
                write!(f, "header {name} cannot be sent over http")
            }
            ReqwestTransportError::Send(err) => write!(f, "request failed: {err}"),
        }
    }
}

impl std::error::Error for ReqwestTransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReqwestTransportError::Send(err) => Some(err),
            ReqwestTransportError::InvalidHeader { .. } => None,
        }
    }
}

// Thin wrapper around the blocking reqwest client. The client is pooled
// internally and cheap to clone.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, ClientError> {
        if config.accept_invalid_certs {
            tracing::warn!("tls certificate verification is disabled for the directory transport.");
        }

        let http = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                ClientError::Configuration(format!("failed to build http transport: {err}"))
            })?;

        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: Request) -> Result<TransportResponse, ClientError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut headers = HeaderMap::with_capacity(request.headers.len());
        for (name, value) in &request.headers {
            let invalid = || ClientError::transport(ReqwestTransportError::InvalidHeader {
                name: name.clone(),
            });
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            // from_bytes keeps non-ASCII ticket bytes as they are.
            let header_value = HeaderValue::from_bytes(value.as_bytes()).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }

        let mut builder = self.http.request(method, request.uri).headers(headers);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .map_err(|err| ClientError::transport(ReqwestTransportError::Send(err)))?;

        Ok(TransportResponse {
            status: response.status().as_u16(),
            body: Box::new(response),
        })
    }
}

impl DirectoryServiceClient<ReqwestTransport> {
    // Builds the transport first so a broken TLS setup fails here, not on the
    // first call.
    pub fn connect(service_root: &Url, config: &TransportConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config)?;
        DirectoryServiceClient::new(transport, service_root)
    }
}
