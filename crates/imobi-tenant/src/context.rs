//! Per-request tenant context.

use imobi_core::models::broker::{Broker, BrokerId};
use serde::Serialize;

/// Which resolution tier produced the tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ResolutionPath {
    CustomDomain,
    /// Carries the matched first label.
    Subdomain(String),
    DefaultDev,
}

/// The resolved tenant of one request. Built by
/// [`TenantResolver`](crate::TenantResolver) and dropped with the request.
#[derive(Debug, Clone, Serialize)]
pub struct TenantContext {
    pub tenant_id: BrokerId,
    /// Hostname the resolution ran against.
    pub hostname: String,
    pub path: ResolutionPath,
    pub tenant: Broker,
}

impl TenantContext {
    pub fn custom_domain(&self) -> Option<&str> {
        match self.path {
            ResolutionPath::CustomDomain => Some(&self.hostname),
            _ => None,
        }
    }

    pub fn subdomain(&self) -> Option<&str> {
        match &self.path {
            ResolutionPath::Subdomain(label) => Some(label),
            _ => None,
        }
    }
}
