//! Error types for the IMOBI system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImobiError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization denied: {reason}")]
    AuthorizationDenied { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Tenant not found for hostname {hostname}")]
    TenantNotFound { hostname: String },

    #[error("Tenant {tenant_id} is inactive")]
    TenantInactive { tenant_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ImobiResult<T> = Result<T, ImobiError>;
