use serde_json::{Map, Value};

use crate::domain::{ClientError, ProtocolError};

pub const STATUS_CODE_FIELD: &str = "statuscode";
pub const STATUS_SUCCESS: i64 = 0;

// Validated response: the zero status plus the whole response object.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub status_code: i64,
    pub payload: Map<String, Value>,
}

impl ResponseEnvelope {
    /// Returns `field` as text.
    ///
    /// Numbers are rendered in their JSON form since some directory
    /// deployments return numeric identifiers. Anything else is a protocol
    /// error.
    pub fn required_str(&self, field: &'static str) -> Result<String, ClientError> {
        match self.payload.get(field) {
            None | Some(Value::Null) => Err(ProtocolError::MissingField(field).into()),
            Some(Value::String(value)) => Ok(value.clone()),
            Some(Value::Number(value)) => Ok(value.to_string()),
            Some(_) => Err(ProtocolError::InvalidField(field).into()),
        }
    }
}

/// Parses a raw response body and enforces the success contract.
///
/// Only the JSON `statuscode` decides success; the HTTP status of the response
/// is never consulted here.
pub fn validate(raw: &[u8]) -> Result<ResponseEnvelope, ClientError> {
    let value: Value = serde_json::from_slice(raw).map_err(ProtocolError::MalformedJson)?;
    let Value::Object(payload) = value else {
        return Err(ProtocolError::NotAnObject.into());
    };

    let status_code = match payload.get(STATUS_CODE_FIELD) {
        None => return Err(ProtocolError::MissingStatusCode.into()),
        Some(value) => value
            .as_i64()
            .ok_or_else(|| ProtocolError::InvalidStatusCode(value.clone()))?,
    };

    if status_code != STATUS_SUCCESS {
        return Err(ProtocolError::Status { code: status_code }.into());
    }

    Ok(ResponseEnvelope {
        status_code,
        payload,
    })
}
