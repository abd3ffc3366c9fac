//! Resolution tiers.
//!
//! Each tier either declines the hostname without touching the store, or
//! performs exactly one lookup.

use imobi_core::error::ImobiResult;
use imobi_core::models::broker::{Broker, BrokerId};
use imobi_core::repository::TenantLookup;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::context::ResolutionPath;
use crate::host::Hostname;

/// A broker found by one tier, plus the tier that found it.
#[derive(Debug, Clone)]
pub struct Matched {
    pub broker: Broker,
    pub path: ResolutionPath,
}

#[derive(Debug, Clone)]
pub enum ResolveStrategy {
    /// Exact match on an active broker's custom domain. Declines local
    /// hostnames.
    CustomDomain { local_markers: Vec<String> },
    /// First label matched against an active broker's subdomain or
    /// website slug. Declines undotted hostnames and reserved labels.
    Subdomain { reserved: Vec<String> },
    /// Configured default broker, for local hostnames only.
    DefaultDev {
        local_markers: Vec<String>,
        default_tenant_id: Option<BrokerId>,
    },
}

impl ResolveStrategy {
    /// The standard tier order: custom domain, subdomain, default-dev.
    pub fn standard_chain(config: &ResolverConfig) -> Vec<Self> {
        vec![
            ResolveStrategy::CustomDomain {
                local_markers: config.local_host_markers.clone(),
            },
            ResolveStrategy::Subdomain {
                reserved: config.reserved_subdomains.clone(),
            },
            ResolveStrategy::DefaultDev {
                local_markers: config.local_host_markers.clone(),
                default_tenant_id: config.default_tenant_id.clone(),
            },
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResolveStrategy::CustomDomain { .. } => "custom_domain",
            ResolveStrategy::Subdomain { .. } => "subdomain",
            ResolveStrategy::DefaultDev { .. } => "default_dev",
        }
    }

    pub fn is_dev_fallback(&self) -> bool {
        matches!(self, ResolveStrategy::DefaultDev { .. })
    }

    /// Try this tier against `host`. `Ok(None)` means the tier declined or
    /// found nothing; `Err` is a store failure.
    pub async fn try_resolve<L: TenantLookup>(
        &self,
        lookup: &L,
        host: &Hostname,
    ) -> ImobiResult<Option<Matched>> {
        match self {
            ResolveStrategy::CustomDomain { local_markers } => {
                if host.is_empty() || host.is_local(local_markers) {
                    return Ok(None);
                }
                debug!(hostname = %host, "Checking custom domain");
                let broker = lookup.find_active_by_custom_domain(host.as_str()).await?;
                Ok(broker.map(|broker| Matched {
                    broker,
                    path: ResolutionPath::CustomDomain,
                }))
            }
            ResolveStrategy::Subdomain { reserved } => {
                let Some(label) = host.first_label() else {
                    return Ok(None);
                };
                if reserved.iter().any(|r| r == label) {
                    debug!(label, "Reserved subdomain, skipping");
                    return Ok(None);
                }
                debug!(label, "Checking subdomain");
                let broker = lookup.find_active_by_subdomain_or_slug(label).await?;
                Ok(broker.map(|broker| Matched {
                    broker,
                    path: ResolutionPath::Subdomain(label.to_string()),
                }))
            }
            ResolveStrategy::DefaultDev {
                local_markers,
                default_tenant_id,
            } => {
                if !host.is_local(local_markers) {
                    return Ok(None);
                }
                let Some(id) = default_tenant_id else {
                    return Ok(None);
                };
                debug!(tenant_id = %id, "Using default tenant for local development");
                let broker = lookup.find_by_id(id).await?;
                Ok(broker.map(|broker| Matched {
                    broker,
                    path: ResolutionPath::DefaultDev,
                }))
            }
        }
    }
}
