use serde::Serialize;
use std::fmt;

// Opaque session token issued by the directory service on login.
#[derive(Clone, PartialEq, Eq)]
pub struct Ticket(String);

impl Ticket {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

// Tickets are credentials, keep them out of debug logs.
impl fmt::Debug for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ticket(<redacted>)")
    }
}

// Tenant created by the directory service; the id is server-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tenant {
    pub id: String,
    pub name: String,
}

// User record provisioned inside an existing tenant.
#[derive(Clone)]
pub struct NewUser {
    pub tenant_id: String,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub mail_address: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("tenant_id", &self.tenant_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("mail_address", &self.mail_address)
            .finish()
    }
}

// The serialization within this layer is a dependency leak, but the privilege
// block is a wire constant and has no other shape.
// Zero limits mean "service default" on the directory side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FileSyncPrivileges {
    #[serde(rename = "_quota")]
    pub quota: u64,
    #[serde(rename = "_download_band")]
    pub download_band: u64,
    #[serde(rename = "_upload_band")]
    pub upload_band: u64,
    #[serde(rename = "_version_count")]
    pub version_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Privileges {
    #[serde(rename = "_file_sync")]
    pub file_sync: FileSyncPrivileges,
}

// Fixed privilege block sent with every tenant creation.
pub const DEFAULT_PRIVILEGES: Privileges = Privileges {
    file_sync: FileSyncPrivileges {
        quota: 0,
        download_band: 0,
        upload_band: 0,
        version_count: 0,
    },
};
