//! Tenant access guard for authenticated routes.

use imobi_core::error::ImobiError;
use imobi_core::models::broker::BrokerId;
use thiserror::Error;

use crate::context::TenantContext;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("user or tenant not identified")]
    Unidentified,

    #[error("user does not belong to this tenant")]
    WrongTenant,
}

impl From<AccessError> for ImobiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Unidentified => ImobiError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AccessError::WrongTenant => ImobiError::AuthorizationDenied {
                reason: err.to_string(),
            },
        }
    }
}

/// Check that the caller works for the tenant the request resolved to.
///
/// Runs after resolution; it never looks anything up itself.
pub fn validate_tenant_access(
    user_broker_id: Option<&BrokerId>,
    tenant: Option<&TenantContext>,
) -> Result<(), AccessError> {
    let (Some(user_broker_id), Some(tenant)) = (user_broker_id, tenant) else {
        return Err(AccessError::Unidentified);
    };
    if *user_broker_id != tenant.tenant_id {
        return Err(AccessError::WrongTenant);
    }
    Ok(())
}
