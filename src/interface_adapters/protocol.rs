use serde::Serialize;

use crate::domain::Privileges;

// Request payload for /auth/login.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    // Omitted for logins outside a tenant scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<&'a str>,
    pub username: &'a str,
    pub password: &'a str,
}

// Request payload for /dir_mgt/create_tenant.
#[derive(Serialize)]
pub struct CreateTenantRequest<'a> {
    pub tenant_name: &'a str,
    pub privileges: Privileges,
}

// Request payload for /dir_user/create_user.
#[derive(Serialize)]
pub struct CreateUserRequest<'a> {
    pub tenant_id: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub mail: &'a str,
}

// Success payload fields consumed by the client.
pub const FIELD_TICKET: &str = "ticket";
pub const FIELD_TENANT_ID: &str = "tenant_id";
