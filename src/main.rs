use clap::Parser;
use directory_client::frameworks::{config::ProvisionArgs, provision};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    provision::init_tracing();

    let args = ProvisionArgs::parse();
    match provision::run(&args) {
        Ok(report) => {
            tracing::info!(
                tenant_id = %report.tenant.id,
                tenant_name = %report.tenant.name,
                username = %report.username,
                "provisioning finished."
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(kind = %e.kind(), error = %e, "provisioning failed.");
            ExitCode::FAILURE
        }
    }
}
