use std::fmt;

// Coarse classification callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    StreamRead,
    Integrity,
    Protocol,
}

// Envelope-level failures reported by the directory service or its payloads.
#[derive(Debug)]
pub enum ProtocolError {
    MalformedJson(serde_json::Error),
    NotAnObject,
    MissingStatusCode,
    InvalidStatusCode(serde_json::Value),
    Status { code: i64 },
    MissingField(&'static str),
    InvalidField(&'static str),
    EncodeBody(serde_json::Error),
}

// Single error type surfaced by every directory client call.
#[derive(Debug)]
pub enum ClientError {
    Configuration(String),
    Transport(Box<dyn std::error::Error + Send + Sync>),
    StreamRead(std::io::Error),
    Integrity { expected: String, actual: String },
    Protocol(ProtocolError),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Configuration(_) => ErrorKind::Configuration,
            ClientError::Transport(_) => ErrorKind::Transport,
            ClientError::StreamRead(_) => ErrorKind::StreamRead,
            ClientError::Integrity { .. } => ErrorKind::Integrity,
            ClientError::Protocol(_) => ErrorKind::Protocol,
        }
    }

    pub fn transport(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        ClientError::Transport(err.into())
    }

    // Non-zero envelope code, when the failure came from the service itself.
    pub fn status_code(&self) -> Option<i64> {
        match self {
            ClientError::Protocol(ProtocolError::Status { code }) => Some(*code),
            _ => None,
        }
    }
}

impl From<ProtocolError> for ClientError {
    fn from(err: ProtocolError) -> Self {
        ClientError::Protocol(err)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Transport => "transport",
            ErrorKind::StreamRead => "stream_read",
            ErrorKind::Integrity => "integrity",
            ErrorKind::Protocol => "protocol",
        };
        f.write_str(name)
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::MalformedJson(err) => write!(f, "response is not valid json: {err}"),
            ProtocolError::NotAnObject => write!(f, "response is not a json object"),
            ProtocolError::MissingStatusCode => write!(f, "response has no statuscode field"),
            ProtocolError::InvalidStatusCode(value) => {
                write!(f, "response statuscode is not an integer: {value}")
            }
            ProtocolError::Status { code } => write!(f, "directory service returned code {code}"),
            ProtocolError::MissingField(field) => write!(f, "response has no {field} field"),
            ProtocolError::InvalidField(field) => {
                write!(f, "response field {field} has an unexpected type")
            }
            ProtocolError::EncodeBody(err) => write!(f, "failed to encode request body: {err}"),
        }
    }
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::MalformedJson(err) | ProtocolError::EncodeBody(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Configuration(message) => {
                write!(f, "directory client configuration error: {message}")
            }
            ClientError::Transport(err) => write!(f, "directory transport error: {err}"),
            ClientError::StreamRead(err) => write!(f, "failed to read response stream: {err}"),
            ClientError::Integrity { expected, actual } => {
                write!(f, "md5 mismatch: expected {expected}, got {actual}")
            }
            ClientError::Protocol(err) => write!(f, "directory protocol error: {err}"),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Transport(err) => Some(&**err),
            ClientError::StreamRead(err) => Some(err),
            ClientError::Protocol(err) => Some(err),
            ClientError::Configuration(_) | ClientError::Integrity { .. } => None,
        }
    }
}
