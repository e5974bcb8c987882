use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

use crate::domain::{ClientError, HttpMethod, ProtocolError, Request, Ticket};

pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_CACHE_CONTROL: &str = "cache-control";
pub const HEADER_AUTHORIZATION: &str = "authorization";

pub const MEDIA_TYPE_JSON: &str = "application/json";
pub const NO_CACHE: &str = "no-cache";

// Assembles directory requests. Construction only, nothing is sent from here.
pub struct RequestBuilder {
    method: HttpMethod,
    uri: Url,
    headers: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(method: HttpMethod, uri: Url) -> Self {
        // Every directory request carries the common headers.
        let mut headers = BTreeMap::new();
        headers.insert(HEADER_CONTENT_TYPE.to_string(), MEDIA_TYPE_JSON.to_string());
        headers.insert(HEADER_CACHE_CONTROL.to_string(), NO_CACHE.to_string());

        Self {
            method,
            uri,
            headers,
            body: None,
        }
    }

    pub fn post(uri: Url) -> Self {
        Self::new(HttpMethod::Post, uri)
    }

    pub fn get(uri: Url) -> Self {
        Self::new(HttpMethod::Get, uri)
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    // The ticket is sent as-is, without an auth scheme prefix.
    pub fn ticket(self, ticket: Option<&Ticket>) -> Self {
        match ticket {
            Some(ticket) => self.header(HEADER_AUTHORIZATION, ticket.as_str()),
            None => self,
        }
    }

    pub fn json_body<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ClientError> {
        let encoded = serde_json::to_vec(body).map_err(ProtocolError::EncodeBody)?;
        self.body = Some(encoded);
        Ok(self)
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
        }
    }
}
