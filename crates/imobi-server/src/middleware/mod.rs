//! Request middleware: authentication, tenant resolution and the tenant
//! access guard.
//!
//! Each middleware stores its result in the request extensions; handlers
//! read it back through the extractors defined alongside.

pub mod access;
pub mod auth;
pub mod tenant;

pub use access::require_tenant_access;
pub use auth::{CurrentUser, require_auth, require_super_admin};
pub use tenant::{MaybeTenant, Tenant, optional_tenant, request_hostname, require_tenant};
