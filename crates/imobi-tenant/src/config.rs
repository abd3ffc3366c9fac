//! Resolver configuration.

use std::time::Duration;

use imobi_core::models::broker::BrokerId;

/// First labels that never identify a tenant.
pub const DEFAULT_RESERVED_SUBDOMAINS: &[&str] = &["www", "api", "admin", "app", "mail"];

/// Hostname fragments that mark a local development request.
pub const LOCAL_HOST_MARKERS: &[&str] = &["localhost", "127.0.0.1"];

/// Configuration for [`TenantResolver`](crate::TenantResolver).
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Broker served to local development hosts when nothing else matches.
    pub default_tenant_id: Option<BrokerId>,
    /// First labels skipped by the subdomain tier.
    pub reserved_subdomains: Vec<String>,
    /// A hostname containing any of these is treated as local.
    pub local_host_markers: Vec<String>,
    /// Upper bound for each individual lookup. `None` waits indefinitely.
    pub lookup_timeout: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_tenant_id: None,
            reserved_subdomains: DEFAULT_RESERVED_SUBDOMAINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            local_host_markers: LOCAL_HOST_MARKERS.iter().map(|s| s.to_string()).collect(),
            lookup_timeout: None,
        }
    }
}
