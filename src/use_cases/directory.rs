use url::Url;

use crate::domain::{ClientError, DEFAULT_PRIVILEGES, NewUser, Request, Tenant, Ticket, Transport};
use crate::interface_adapters::protocol::{
    CreateTenantRequest, CreateUserRequest, FIELD_TENANT_ID, FIELD_TICKET, LoginRequest,
};
use crate::use_cases::envelope::{self, ResponseEnvelope};
use crate::use_cases::request_builder::RequestBuilder;
use crate::use_cases::stream_collector::StreamCollector;

pub const SERVICE_BASE_PATH: &str = "/dir/services";

const PATH_LOGIN: &str = "auth/login";
const PATH_CREATE_TENANT: &str = "dir_mgt/create_tenant";
const PATH_CREATE_USER: &str = "dir_user/create_user";

// Endpoint URIs derived once from the service root.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub login: Url,
    pub create_tenant: Url,
    pub create_user: Url,
}

impl Endpoints {
    pub fn new(service_root: &Url) -> Result<Self, ClientError> {
        // Url::join drops the last segment unless the base ends with a slash.
        let mut root = service_root.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }

        let join = |path: &str| {
            root.join(path).map_err(|err| {
                ClientError::Configuration(format!("invalid endpoint {path} under {root}: {err}"))
            })
        };

        Ok(Self {
            login: join(PATH_LOGIN)?,
            create_tenant: join(PATH_CREATE_TENANT)?,
            create_user: join(PATH_CREATE_USER)?,
        })
    }
}

// Builds `<scheme>://<host>/dir/services`.
pub fn service_root(scheme: &str, host: &str) -> Result<Url, ClientError> {
    let host = host.trim().trim_end_matches('/');
    if host.is_empty() {
        return Err(ClientError::Configuration(
            "directory host must not be empty".to_string(),
        ));
    }

    let raw = format!("{scheme}://{host}{SERVICE_BASE_PATH}");
    let url = Url::parse(&raw).map_err(|err| {
        ClientError::Configuration(format!("invalid directory address {raw}: {err}"))
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientError::Configuration(format!(
            "directory address {raw} cannot be used as a base"
        )));
    }
    Ok(url)
}

/// Client for the directory service management API.
///
/// Holds only the transport and the endpoint URIs, both fixed at construction,
/// so one value can be shared across threads. Every call is blocking and runs
/// build, send, collect, validate and extract in order; the first failure ends
/// the call.
pub struct DirectoryServiceClient<T> {
    transport: T,
    endpoints: Endpoints,
    collector: StreamCollector,
}

impl<T> DirectoryServiceClient<T>
where
    T: Transport,
{
    pub fn new(transport: T, service_root: &Url) -> Result<Self, ClientError> {
        let endpoints = Endpoints::new(service_root)?;
        tracing::debug!(service_root = %service_root, "directory client configured.");
        Ok(Self {
            transport,
            endpoints,
            collector: StreamCollector::default(),
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    #[tracing::instrument(
        name = "directory_login",
        skip_all,
        fields(tenant_id = ?tenant_id, username = %username)
    )]
    pub fn login(
        &self,
        tenant_id: Option<&str>,
        username: &str,
        password: &str,
    ) -> Result<Ticket, ClientError> {
        let body = LoginRequest {
            tenant_id: tenant_id.filter(|id| !id.is_empty()),
            username,
            password,
        };
        // No ticket exists before login.
        let request = RequestBuilder::post(self.endpoints.login.clone())
            .json_body(&body)?
            .build();

        let envelope = self.call(request)?;
        let ticket = envelope.required_str(FIELD_TICKET)?;

        tracing::info!("directory ticket issued.");
        Ok(Ticket::new(ticket))
    }

    #[tracing::instrument(
        name = "directory_create_tenant",
        skip_all,
        fields(tenant_name = %tenant_name)
    )]
    pub fn create_tenant(
        &self,
        admin_ticket: &Ticket,
        tenant_name: &str,
    ) -> Result<Tenant, ClientError> {
        let body = CreateTenantRequest {
            tenant_name,
            privileges: DEFAULT_PRIVILEGES,
        };
        let request = RequestBuilder::post(self.endpoints.create_tenant.clone())
            .ticket(Some(admin_ticket))
            .json_body(&body)?
            .build();

        let envelope = self.call(request)?;
        let id = envelope.required_str(FIELD_TENANT_ID)?;

        tracing::info!(tenant_id = %id, "tenant created.");
        Ok(Tenant {
            id,
            name: tenant_name.to_string(),
        })
    }

    #[tracing::instrument(
        name = "directory_create_user",
        skip_all,
        fields(tenant_id = %user.tenant_id, username = %user.username)
    )]
    pub fn create_user(&self, admin_ticket: &Ticket, user: &NewUser) -> Result<(), ClientError> {
        let body = CreateUserRequest {
            tenant_id: &user.tenant_id,
            username: &user.username,
            password: &user.password,
            firstname: &user.first_name,
            lastname: &user.last_name,
            mail: &user.mail_address,
        };
        let request = RequestBuilder::post(self.endpoints.create_user.clone())
            .ticket(Some(admin_ticket))
            .json_body(&body)?
            .build();

        // Only the zero status matters; the payload carries nothing we need.
        self.call(request)?;

        tracing::info!("user created.");
        Ok(())
    }

    // Shared send/collect/validate path. The response handle is owned here and
    // dropped before returning on every path.
    fn call(&self, request: Request) -> Result<ResponseEnvelope, ClientError> {
        tracing::debug!(method = %request.method, uri = %request.uri, "sending directory request.");

        let response = self.transport.execute(request).map_err(|e| {
            tracing::error!(error = %e, "directory request failed.");
            e
        })?;
        let http_status = response.status;

        let raw = self.collector.collect(response.body, None).map_err(|e| {
            tracing::error!(http_status, error = %e, "failed to read directory response.");
            e
        })?;

        envelope::validate(&raw).map_err(|e| {
            tracing::debug!(
                http_status,
                status_code = ?e.status_code(),
                "directory rejected the request."
            );
            e
        })
    }
}
