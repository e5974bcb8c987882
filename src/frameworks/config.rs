use clap::Parser;
use std::time::Duration;
use uuid::Uuid;

use crate::interface_adapters::TransportConfig;

// Runtime settings for the provisioning command. Every flag that carries a
// credential or an address can also come from the environment or `.env`.
#[derive(Debug, Parser)]
#[command(
    name = "directory-provision",
    about = "Log in as a directory admin, create a tenant and a user inside it"
)]
pub struct ProvisionArgs {
    /// Directory host, optionally with a port
    #[arg(short = 'H', long, env = "DIRECTORY_HOST")]
    pub host: String,

    /// Admin account used to log in
    #[arg(short = 'u', long, env = "DIRECTORY_ADMIN_USER")]
    pub admin_user: String,

    /// Admin password
    #[arg(short = 'p', long, env = "DIRECTORY_ADMIN_PASSWORD", hide_env_values = true)]
    pub admin_password: String,

    /// URL scheme of the directory service
    #[arg(long, env = "DIRECTORY_SCHEME", default_value = "https")]
    pub scheme: String,

    /// Trust self-signed certificates
    #[arg(long, env = "DIRECTORY_ACCEPT_INVALID_CERTS")]
    pub accept_invalid_certs: bool,

    /// Request timeout in milliseconds; unset waits indefinitely
    #[arg(long, env = "DIRECTORY_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Name of the tenant to create; random when omitted
    #[arg(long)]
    pub tenant_name: Option<String>,

    /// Username of the user created in the new tenant
    #[arg(long, default_value = "user")]
    pub username: String,

    /// Password of the user created in the new tenant
    #[arg(long, env = "DIRECTORY_USER_PASSWORD", hide_env_values = true)]
    pub user_password: String,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub mail: Option<String>,
}

impl ProvisionArgs {
    pub fn transport_config(&self) -> TransportConfig {
        TransportConfig {
            accept_invalid_certs: self.accept_invalid_certs,
            timeout: self.timeout_ms.map(Duration::from_millis),
        }
    }

    pub fn tenant_name(&self) -> String {
        self.tenant_name
            .clone()
            .unwrap_or_else(|| format!("test-{}", short_id()))
    }
}

// Filler for optional user fields nobody cares about in test tenants.
pub fn generated_value(given: Option<&str>) -> String {
    given.map(str::to_string).unwrap_or_else(short_id)
}

fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(12);
    id
}
