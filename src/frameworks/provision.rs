// Framework bootstrap for the provisioning command.

use crate::domain::{ClientError, NewUser, Tenant, Transport};
use crate::frameworks::config::{ProvisionArgs, generated_value};
use crate::use_cases::{DirectoryServiceClient, service_root};

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// What the provisioning run created.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub tenant: Tenant,
    pub username: String,
}

pub fn run(args: &ProvisionArgs) -> Result<ProvisionReport, ClientError> {
    let root = service_root(&args.scheme, &args.host)?;
    tracing::debug!(service_root = %root, "directory address resolved.");
    let client = DirectoryServiceClient::connect(&root, &args.transport_config())?;

    provision(&client, args)
}

// Admin login, then tenant, then user. Each step needs the previous one, so
// they run strictly in order.
pub fn provision<T: Transport>(
    client: &DirectoryServiceClient<T>,
    args: &ProvisionArgs,
) -> Result<ProvisionReport, ClientError> {
    let admin_ticket = client.login(None, &args.admin_user, &args.admin_password)?;
    tracing::info!(admin = %args.admin_user, "logged in to the directory.");

    let tenant_name = args.tenant_name();
    tracing::info!(%tenant_name, "creating tenant.");
    let tenant = client.create_tenant(&admin_ticket, &tenant_name)?;
    tracing::info!(tenant_id = %tenant.id, "tenant ready.");

    let user = NewUser {
        tenant_id: tenant.id.clone(),
        username: args.username.clone(),
        password: args.user_password.clone(),
        first_name: generated_value(args.first_name.as_deref()),
        last_name: generated_value(args.last_name.as_deref()),
        mail_address: generated_value(args.mail.as_deref()),
    };
    tracing::info!(username = %user.username, tenant = %tenant.name, "creating user.");
    client.create_user(&admin_ticket, &user)?;

    Ok(ProvisionReport {
        tenant,
        username: user.username,
    })
}
