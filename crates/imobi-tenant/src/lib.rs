//! IMOBI Tenant: maps an inbound request host to the broker that owns it.
//!
//! Resolution runs an ordered list of [`ResolveStrategy`] tiers (custom
//! domain, subdomain, local-development default) against a
//! [`TenantLookup`](imobi_core::repository::TenantLookup). The first tier
//! that finds a broker wins; an inactive broker is rejected rather than
//! skipped. The result is a per-request [`TenantContext`].

pub mod access;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod resolver;
pub mod strategy;

pub use access::{AccessError, validate_tenant_access};
pub use config::ResolverConfig;
pub use context::{ResolutionPath, TenantContext};
pub use error::ResolveError;
pub use host::Hostname;
pub use resolver::TenantResolver;
pub use strategy::{Matched, ResolveStrategy};
