//! Broker (tenant) domain model.
//!
//! A broker is one real-estate brokerage using the platform. Every piece
//! of business data (properties, leads, profiles) is scoped to a broker
//! through its [`BrokerId`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque broker identifier.
///
/// New brokers receive a UUID v4, but identifiers provisioned elsewhere
/// (e.g. `abc123`) are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrokerId(String);

impl BrokerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BrokerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BrokerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for BrokerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    #[default]
    Free,
    Basic,
    Premium,
    Enterprise,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::Basic => "basic",
            PlanType::Premium => "premium",
            PlanType::Enterprise => "enterprise",
        }
    }
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanType::Free),
            "basic" => Ok(PlanType::Basic),
            "premium" => Ok(PlanType::Premium),
            "enterprise" => Ok(PlanType::Enterprise),
            other => Err(format!("unknown plan type: {other}")),
        }
    }
}

/// A brokerage account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    pub id: BrokerId,
    /// Display name of the account owner.
    pub name: String,
    /// Trading name shown on the public website.
    pub business_name: String,
    pub email: String,
    /// Tenant-owned domain pointed at the platform (e.g. `imoveisagora.com.br`).
    pub custom_domain: Option<String>,
    /// Label under the platform domain (e.g. `joaocorretor`).
    pub subdomain: Option<String>,
    /// Tenant-chosen short identifier, also usable as a subdomain label.
    pub website_slug: Option<String>,
    pub is_active: bool,
    pub plan_type: PlanType,
    pub theme_settings: serde_json::Value,
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub site_favicon_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new broker.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CreateBroker {
    /// Explicit identifier; a UUID v4 is generated when absent.
    pub id: Option<BrokerId>,
    pub name: String,
    pub business_name: String,
    pub email: String,
    pub custom_domain: Option<String>,
    pub subdomain: Option<String>,
    pub website_slug: Option<String>,
    pub is_active: bool,
    pub plan_type: PlanType,
    pub theme_settings: Option<serde_json::Value>,
}

/// Fields that can be updated on an existing broker.
///
/// Optional columns use `Option<Option<_>>`: `Some(Some(v))` sets,
/// `Some(None)` clears, `None` leaves unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateBroker {
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub email: Option<String>,
    pub custom_domain: Option<Option<String>>,
    pub subdomain: Option<Option<String>>,
    pub website_slug: Option<Option<String>>,
    pub plan_type: Option<PlanType>,
    pub theme_settings: Option<serde_json::Value>,
    pub site_title: Option<Option<String>>,
    pub site_description: Option<Option<String>>,
    pub site_favicon_url: Option<Option<String>>,
}

/// The subset of a broker that is safe to expose on the public website.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PublicBrokerInfo {
    pub id: BrokerId,
    pub name: String,
    pub business_name: String,
    pub website_slug: Option<String>,
    pub theme_settings: serde_json::Value,
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub site_favicon_url: Option<String>,
}

impl From<&Broker> for PublicBrokerInfo {
    fn from(broker: &Broker) -> Self {
        Self {
            id: broker.id.clone(),
            name: broker.name.clone(),
            business_name: broker.business_name.clone(),
            website_slug: broker.website_slug.clone(),
            theme_settings: broker.theme_settings.clone(),
            site_title: broker.site_title.clone(),
            site_description: broker.site_description.clone(),
            site_favicon_url: broker.site_favicon_url.clone(),
        }
    }
}
