use std::sync::Arc;

use imobi_auth::{AuthConfig, AuthService};
use imobi_db::repository::{SurrealBrokerRepository, SurrealProfileRepository};
use imobi_tenant::{ResolverConfig, TenantResolver};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

pub type Brokers = SurrealBrokerRepository<Any>;
pub type Resolver = TenantResolver<Brokers>;
pub type Auth = AuthService<SurrealProfileRepository<Any>>;

/// Shared, read-only handles available to every handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub brokers: Brokers,
    pub resolver: Arc<Resolver>,
    pub auth: Arc<Auth>,
}

impl AppState {
    pub fn new(db: Surreal<Any>, resolver: ResolverConfig, auth: AuthConfig) -> Self {
        let brokers = SurrealBrokerRepository::new(db.clone());
        Self {
            resolver: Arc::new(TenantResolver::new(brokers.clone(), resolver)),
            auth: Arc::new(AuthService::new(SurrealProfileRepository::new(db), auth)),
            brokers,
        }
    }
}
