//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Business data is scoped to a
//! broker; the traits here cover the broker (tenant) records themselves
//! and the profiles that associate users with brokers.

use uuid::Uuid;

use crate::error::ImobiResult;
use crate::models::{
    broker::{Broker, BrokerId, CreateBroker, UpdateBroker},
    profile::{CreateProfile, Profile},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Brokers (global scope)
// ---------------------------------------------------------------------------

pub trait BrokerRepository: Send + Sync {
    fn create(&self, input: CreateBroker) -> impl Future<Output = ImobiResult<Broker>> + Send;
    fn get_by_id(&self, id: &BrokerId) -> impl Future<Output = ImobiResult<Broker>> + Send;
    fn update(
        &self,
        id: &BrokerId,
        input: UpdateBroker,
    ) -> impl Future<Output = ImobiResult<Broker>> + Send;
    /// Activate or deactivate a broker. Brokers are never hard-deleted.
    fn set_active(
        &self,
        id: &BrokerId,
        is_active: bool,
    ) -> impl Future<Output = ImobiResult<Broker>> + Send;
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = ImobiResult<PaginatedResult<Broker>>> + Send;
    /// Brokers other than `except`, active or not, whose subdomain or
    /// website slug equals `label`.
    fn find_label_claimants(
        &self,
        label: &str,
        except: &BrokerId,
    ) -> impl Future<Output = ImobiResult<Vec<Broker>>> + Send;
    /// Brokers other than `except`, active or not, claiming `domain`.
    fn find_domain_claimants(
        &self,
        domain: &str,
        except: &BrokerId,
    ) -> impl Future<Output = ImobiResult<Vec<Broker>>> + Send;
}

/// Read-only lookups used by tenant resolution.
///
/// Every method returns `Ok(None)` when nothing matches; `Err` is reserved
/// for failures of the store itself.
pub trait TenantLookup: Send + Sync {
    fn find_active_by_custom_domain(
        &self,
        domain: &str,
    ) -> impl Future<Output = ImobiResult<Option<Broker>>> + Send;

    /// Match on `subdomain = label OR website_slug = label`.
    fn find_active_by_subdomain_or_slug(
        &self,
        label: &str,
    ) -> impl Future<Output = ImobiResult<Option<Broker>>> + Send;

    /// Exact id lookup with no activity filter.
    fn find_by_id(&self, id: &BrokerId) -> impl Future<Output = ImobiResult<Option<Broker>>> + Send;
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

pub trait ProfileRepository: Send + Sync {
    fn create(&self, input: CreateProfile) -> impl Future<Output = ImobiResult<Profile>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = ImobiResult<Profile>> + Send;
}
