//! The tenant resolver.

use std::time::Duration;

use imobi_core::error::ImobiResult;
use imobi_core::repository::TenantLookup;
use tracing::{debug, error, info, warn};

use crate::config::ResolverConfig;
use crate::context::TenantContext;
use crate::error::ResolveError;
use crate::host::Hostname;
use crate::strategy::{Matched, ResolveStrategy};

/// Resolves hostnames to tenants.
///
/// Immutable after construction and holds no per-request state; share it
/// behind an `Arc`. Every call goes to the store, nothing is cached.
pub struct TenantResolver<L: TenantLookup> {
    lookup: L,
    strategies: Vec<ResolveStrategy>,
    lookup_timeout: Option<Duration>,
}

impl<L: TenantLookup> TenantResolver<L> {
    pub fn new(lookup: L, config: ResolverConfig) -> Self {
        Self {
            strategies: ResolveStrategy::standard_chain(&config),
            lookup_timeout: config.lookup_timeout,
            lookup,
        }
    }

    /// Build a resolver from an explicit tier list, tried in order.
    pub fn with_strategies(
        lookup: L,
        strategies: Vec<ResolveStrategy>,
        lookup_timeout: Option<Duration>,
    ) -> Self {
        Self {
            lookup,
            strategies,
            lookup_timeout,
        }
    }

    pub fn strategies(&self) -> &[ResolveStrategy] {
        &self.strategies
    }

    /// Run every tier in order against `host`.
    pub async fn resolve(&self, host: &Hostname) -> Result<TenantContext, ResolveError> {
        self.run(host, true).await
    }

    /// Like [`resolve`](Self::resolve), but a host that matches no tenant
    /// yields `Ok(None)`. Inactive tenants and store failures are still
    /// errors.
    pub async fn resolve_optional(
        &self,
        host: &Hostname,
    ) -> Result<Option<TenantContext>, ResolveError> {
        match self.resolve(host).await {
            Ok(ctx) => Ok(Some(ctx)),
            Err(ResolveError::NotFound { hostname }) => {
                debug!(%hostname, "Optional tenant resolution found nothing, continuing");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve a domain supplied by a client (e.g. the website frontend)
    /// rather than by the request itself. The local-development fallback
    /// never applies here.
    pub async fn identify(&self, domain: &Hostname) -> Result<TenantContext, ResolveError> {
        self.run(domain, false).await
    }

    async fn run(&self, host: &Hostname, allow_dev: bool) -> Result<TenantContext, ResolveError> {
        let mut matched = None;
        for strategy in &self.strategies {
            if strategy.is_dev_fallback() && !allow_dev {
                continue;
            }
            if let Some(found) = self.attempt(strategy, host).await? {
                matched = Some(found);
                break;
            }
        }

        let Some(Matched { broker, path }) = matched else {
            info!(hostname = %host, "Tenant not found");
            return Err(ResolveError::NotFound {
                hostname: host.to_string(),
            });
        };

        if !broker.is_active {
            warn!(
                hostname = %host,
                tenant_id = %broker.id,
                business_name = %broker.business_name,
                "Tenant inactive"
            );
            return Err(ResolveError::Inactive {
                tenant_id: broker.id,
                hostname: host.to_string(),
            });
        }

        debug!(
            hostname = %host,
            tenant_id = %broker.id,
            path = ?path,
            "Tenant identified"
        );

        Ok(TenantContext {
            tenant_id: broker.id.clone(),
            hostname: host.to_string(),
            path,
            tenant: broker,
        })
    }

    async fn attempt(
        &self,
        strategy: &ResolveStrategy,
        host: &Hostname,
    ) -> Result<Option<Matched>, ResolveError> {
        let outcome: ImobiResult<Option<Matched>> = match self.lookup_timeout {
            Some(limit) => {
                match tokio::time::timeout(limit, strategy.try_resolve(&self.lookup, host)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        error!(
                            hostname = %host,
                            tier = strategy.name(),
                            timeout_ms = limit.as_millis() as u64,
                            "Tenant lookup timed out"
                        );
                        return Err(ResolveError::Internal {
                            reason: format!("{} lookup timed out", strategy.name()),
                        });
                    }
                }
            }
            None => strategy.try_resolve(&self.lookup, host).await,
        };

        outcome.map_err(|e| {
            error!(hostname = %host, tier = strategy.name(), error = %e, "Tenant lookup failed");
            ResolveError::Internal {
                reason: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use imobi_core::models::broker::{Broker, BrokerId};

    use super::*;
    use crate::context::ResolutionPath;
    use crate::strategy::tests::{StubLookup, broker};

    fn config_with_default(id: &str) -> ResolverConfig {
        ResolverConfig {
            default_tenant_id: Some(BrokerId::new(id)),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn custom_domain_wins_over_subdomain_data() {
        let lookup = StubLookup::with(vec![
            Broker {
                subdomain: Some("imoveisagora".into()),
                ..broker("by-subdomain")
            },
            Broker {
                custom_domain: Some("imoveisagora.com.br".into()),
                ..broker("by-domain")
            },
        ]);
        let resolver = TenantResolver::new(lookup, ResolverConfig::default());

        let ctx = resolver
            .resolve(&Hostname::parse("imoveisagora.com.br"))
            .await
            .unwrap();
        assert_eq!(ctx.tenant_id.as_str(), "by-domain");
        assert_eq!(ctx.custom_domain(), Some("imoveisagora.com.br"));
    }

    #[tokio::test]
    async fn undotted_remote_host_is_not_found() {
        let lookup = StubLookup::with(vec![broker("abc123")]);
        let resolver = TenantResolver::new(lookup, config_with_default("abc123"));

        let err = resolver
            .resolve(&Hostname::parse("intranet"))
            .await
            .unwrap_err();
        match err {
            ResolveError::NotFound { hostname } => assert_eq!(hostname, "intranet"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn inactive_default_tenant_is_rejected() {
        let lookup = StubLookup::with(vec![Broker {
            is_active: false,
            ..broker("abc123")
        }]);
        let resolver = TenantResolver::new(lookup, config_with_default("abc123"));

        let err = resolver
            .resolve(&Hostname::parse("localhost:3000"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Inactive { .. }));
    }

    #[tokio::test]
    async fn store_failure_is_internal_not_not_found() {
        let lookup = StubLookup {
            fail: true,
            ..Default::default()
        };
        let resolver = TenantResolver::new(lookup, ResolverConfig::default());

        let err = resolver
            .resolve(&Hostname::parse("imoveisagora.com.br"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Internal { .. }));
    }

    #[tokio::test]
    async fn first_failing_tier_stops_the_chain() {
        let lookup = StubLookup {
            fail: true,
            ..Default::default()
        };
        let resolver = TenantResolver::new(lookup, ResolverConfig::default());

        let _ = resolver.resolve(&Hostname::parse("joao.saasdomain.com")).await;
        assert_eq!(resolver.lookup.calls(), 1);
    }

    #[tokio::test]
    async fn declining_tiers_skip_the_store() {
        let lookup = StubLookup::default();
        let resolver = TenantResolver::new(lookup, config_with_default("missing"));

        // "dev.localhost" is local (custom domain declines) and dotted.
        let _ = resolver.resolve(&Hostname::parse("dev.localhost")).await;
        assert_eq!(resolver.lookup.calls(), 2);

        let _ = resolver.resolve(&Hostname::parse("joao.saasdomain.com")).await;
        assert_eq!(resolver.lookup.calls(), 4);
    }

    #[tokio::test]
    async fn optional_resolution_swallows_only_not_found() {
        let resolver = TenantResolver::new(StubLookup::default(), ResolverConfig::default());
        let none = resolver
            .resolve_optional(&Hostname::parse("nobody.saasdomain.com"))
            .await
            .unwrap();
        assert!(none.is_none());

        let inactive = TenantResolver::new(
            StubLookup::with(vec![Broker {
                is_active: false,
                ..broker("abc123")
            }]),
            config_with_default("abc123"),
        );
        let err = inactive
            .resolve_optional(&Hostname::parse("localhost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Inactive { .. }));

        let failing = TenantResolver::new(
            StubLookup {
                fail: true,
                ..Default::default()
            },
            ResolverConfig::default(),
        );
        let err = failing
            .resolve_optional(&Hostname::parse("example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Internal { .. }));
    }

    #[tokio::test]
    async fn identify_skips_dev_fallback() {
        let lookup = StubLookup::with(vec![broker("abc123")]);
        let resolver = TenantResolver::new(lookup, config_with_default("abc123"));

        let err = resolver
            .identify(&Hostname::parse("localhost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));

        let ctx = resolver.resolve(&Hostname::parse("localhost")).await.unwrap();
        assert_eq!(ctx.path, ResolutionPath::DefaultDev);
    }

    struct HangingLookup;

    impl TenantLookup for HangingLookup {
        async fn find_active_by_custom_domain(&self, _: &str) -> ImobiResult<Option<Broker>> {
            std::future::pending().await
        }

        async fn find_active_by_subdomain_or_slug(&self, _: &str) -> ImobiResult<Option<Broker>> {
            std::future::pending().await
        }

        async fn find_by_id(&self, _: &BrokerId) -> ImobiResult<Option<Broker>> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn hung_lookup_times_out_as_internal() {
        let resolver = TenantResolver::new(
            HangingLookup,
            ResolverConfig {
                lookup_timeout: Some(Duration::from_millis(20)),
                ..Default::default()
            },
        );

        let err = resolver
            .resolve(&Hostname::parse("example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Internal { .. }));
    }
}
