//! Tenant resolution error types.

use imobi_core::error::ImobiError;
use imobi_core::models::broker::BrokerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// No tier produced a broker.
    #[error("tenant not found for hostname {hostname}")]
    NotFound { hostname: String },

    /// A broker matched but is deactivated.
    #[error("tenant {tenant_id} is inactive (hostname {hostname})")]
    Inactive { tenant_id: BrokerId, hostname: String },

    /// The tenant store failed or did not answer in time.
    #[error("tenant lookup failed: {reason}")]
    Internal { reason: String },
}

impl From<ResolveError> for ImobiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NotFound { hostname } => ImobiError::TenantNotFound { hostname },
            ResolveError::Inactive { tenant_id, .. } => ImobiError::TenantInactive {
                tenant_id: tenant_id.to_string(),
            },
            ResolveError::Internal { reason } => ImobiError::Internal(reason),
        }
    }
}
