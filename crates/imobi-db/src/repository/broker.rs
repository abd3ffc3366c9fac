//! SurrealDB implementation of [`BrokerRepository`] and [`TenantLookup`].

use chrono::{DateTime, Utc};
use imobi_core::error::ImobiResult;
use imobi_core::models::broker::{Broker, BrokerId, CreateBroker, PlanType, UpdateBroker};
use imobi_core::repository::{BrokerRepository, PaginatedResult, Pagination, TenantLookup};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::warn;

use crate::error::DbError;

/// DB-side row struct for queries where the id is already known.
#[derive(Debug, SurrealValue)]
struct BrokerRow {
    name: String,
    business_name: String,
    email: String,
    custom_domain: Option<String>,
    subdomain: Option<String>,
    website_slug: Option<String>,
    is_active: bool,
    plan_type: String,
    theme_settings: serde_json::Value,
    site_title: Option<String>,
    site_description: Option<String>,
    site_favicon_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BrokerRow {
    fn into_broker(self, id: BrokerId) -> Result<Broker, DbError> {
        Ok(Broker {
            id,
            name: self.name,
            business_name: self.business_name,
            email: self.email,
            custom_domain: self.custom_domain,
            subdomain: self.subdomain,
            website_slug: self.website_slug,
            is_active: self.is_active,
            plan_type: parse_plan(&self.plan_type)?,
            theme_settings: self.theme_settings,
            site_title: self.site_title,
            site_description: self.site_description,
            site_favicon_url: self.site_favicon_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct BrokerRowWithId {
    record_id: String,
    name: String,
    business_name: String,
    email: String,
    custom_domain: Option<String>,
    subdomain: Option<String>,
    website_slug: Option<String>,
    is_active: bool,
    plan_type: String,
    theme_settings: serde_json::Value,
    site_title: Option<String>,
    site_description: Option<String>,
    site_favicon_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BrokerRowWithId {
    fn try_into_broker(self) -> Result<Broker, DbError> {
        Ok(Broker {
            id: BrokerId::new(self.record_id),
            name: self.name,
            business_name: self.business_name,
            email: self.email,
            custom_domain: self.custom_domain,
            subdomain: self.subdomain,
            website_slug: self.website_slug,
            is_active: self.is_active,
            plan_type: parse_plan(&self.plan_type)?,
            theme_settings: self.theme_settings,
            site_title: self.site_title,
            site_description: self.site_description,
            site_favicon_url: self.site_favicon_url,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn parse_plan(s: &str) -> Result<PlanType, DbError> {
    s.parse().map_err(DbError::Corrupt)
}

/// Hostname-like columns are matched case-insensitively, so they are
/// stored lower-cased. Blank values are stored as NONE.
fn normalize_label(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}

/// Collapse a lookup result to at most one broker.
///
/// Domain and slug claims are expected to be unique; when more than one
/// row matches the claim is ambiguous and nothing is returned.
fn single_match(
    rows: Vec<BrokerRowWithId>,
    column: &str,
    value: &str,
) -> Result<Option<Broker>, DbError> {
    let mut rows = rows.into_iter();
    let Some(first) = rows.next() else {
        return Ok(None);
    };
    if rows.next().is_some() {
        warn!(column, value, "Ambiguous broker lookup, ignoring match");
        return Ok(None);
    }
    first.try_into_broker().map(Some)
}

/// SurrealDB implementation of the Broker repository.
#[derive(Clone)]
pub struct SurrealBrokerRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealBrokerRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn select_where(
        &self,
        condition: &'static str,
        value: String,
    ) -> Result<Vec<BrokerRowWithId>, DbError> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM broker \
             WHERE {condition} LIMIT 2"
        );
        let mut result = self.db.query(query).bind(("value", value)).await?;
        let rows: Vec<BrokerRowWithId> = result.take(0)?;
        Ok(rows)
    }

    /// Every broker except `except` matching `condition`, with no activity
    /// filter and no limit.
    async fn select_claimants(
        &self,
        condition: &'static str,
        value: &str,
        except: &BrokerId,
    ) -> Result<Vec<Broker>, DbError> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, * FROM broker \
             WHERE ({condition}) AND meta::id(id) != $except"
        );
        let mut result = self
            .db
            .query(query)
            .bind(("value", value.to_ascii_lowercase()))
            .bind(("except", except.to_string()))
            .await?;
        let rows: Vec<BrokerRowWithId> = result.take(0)?;
        rows.into_iter()
            .map(BrokerRowWithId::try_into_broker)
            .collect()
    }
}

impl<C: Connection> BrokerRepository for SurrealBrokerRepository<C> {
    async fn create(&self, input: CreateBroker) -> ImobiResult<Broker> {
        let id = input.id.unwrap_or_else(BrokerId::generate);
        let theme_settings = input
            .theme_settings
            .unwrap_or(serde_json::Value::Object(Default::default()));

        let result = self
            .db
            .query(
                "CREATE type::record('broker', $id) SET \
                 name = $name, business_name = $business_name, \
                 email = $email, custom_domain = $custom_domain, \
                 subdomain = $subdomain, website_slug = $website_slug, \
                 is_active = $is_active, plan_type = $plan_type, \
                 theme_settings = $theme_settings",
            )
            .bind(("id", id.to_string()))
            .bind(("name", input.name))
            .bind(("business_name", input.business_name))
            .bind(("email", input.email))
            .bind(("custom_domain", normalize_label(input.custom_domain)))
            .bind(("subdomain", normalize_label(input.subdomain)))
            .bind(("website_slug", normalize_label(input.website_slug)))
            .bind(("is_active", input.is_active))
            .bind(("plan_type", input.plan_type.as_str()))
            .bind(("theme_settings", theme_settings))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<BrokerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "broker".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_broker(id)?)
    }

    async fn get_by_id(&self, id: &BrokerId) -> ImobiResult<Broker> {
        self.find_by_id(id).await?.ok_or_else(|| {
            DbError::NotFound {
                entity: "broker".into(),
                id: id.to_string(),
            }
            .into()
        })
    }

    async fn update(&self, id: &BrokerId, input: UpdateBroker) -> ImobiResult<Broker> {
        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
        }
        if input.business_name.is_some() {
            sets.push("business_name = $business_name");
        }
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.custom_domain.is_some() {
            sets.push("custom_domain = $custom_domain");
        }
        if input.subdomain.is_some() {
            sets.push("subdomain = $subdomain");
        }
        if input.website_slug.is_some() {
            sets.push("website_slug = $website_slug");
        }
        if input.plan_type.is_some() {
            sets.push("plan_type = $plan_type");
        }
        if input.theme_settings.is_some() {
            sets.push("theme_settings = $theme_settings");
        }
        if input.site_title.is_some() {
            sets.push("site_title = $site_title");
        }
        if input.site_description.is_some() {
            sets.push("site_description = $site_description");
        }
        if input.site_favicon_url.is_some() {
            sets.push("site_favicon_url = $site_favicon_url");
        }
        sets.push("updated_at = time::now()");

        let query = format!("UPDATE type::record('broker', $id) SET {}", sets.join(", "));

        let mut builder = self.db.query(&query).bind(("id", id.to_string()));

        if let Some(name) = input.name {
            builder = builder.bind(("name", name));
        }
        if let Some(business_name) = input.business_name {
            builder = builder.bind(("business_name", business_name));
        }
        if let Some(email) = input.email {
            builder = builder.bind(("email", email));
        }
        // Option<Option<String>>: Some(Some(v)) = set, Some(None) = clear
        if let Some(custom_domain) = input.custom_domain {
            builder = builder.bind(("custom_domain", normalize_label(custom_domain)));
        }
        if let Some(subdomain) = input.subdomain {
            builder = builder.bind(("subdomain", normalize_label(subdomain)));
        }
        if let Some(website_slug) = input.website_slug {
            builder = builder.bind(("website_slug", normalize_label(website_slug)));
        }
        if let Some(plan_type) = input.plan_type {
            builder = builder.bind(("plan_type", plan_type.as_str()));
        }
        if let Some(theme_settings) = input.theme_settings {
            builder = builder.bind(("theme_settings", theme_settings));
        }
        if let Some(site_title) = input.site_title {
            builder = builder.bind(("site_title", site_title));
        }
        if let Some(site_description) = input.site_description {
            builder = builder.bind(("site_description", site_description));
        }
        if let Some(site_favicon_url) = input.site_favicon_url {
            builder = builder.bind(("site_favicon_url", site_favicon_url));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<BrokerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "broker".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_broker(id.clone())?)
    }

    async fn set_active(&self, id: &BrokerId, is_active: bool) -> ImobiResult<Broker> {
        let mut result = self
            .db
            .query(
                "UPDATE type::record('broker', $id) SET \
                 is_active = $is_active, updated_at = time::now()",
            )
            .bind(("id", id.to_string()))
            .bind(("is_active", is_active))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BrokerRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "broker".into(),
            id: id.to_string(),
        })?;

        Ok(row.into_broker(id.clone())?)
    }

    async fn list(&self, pagination: Pagination) -> ImobiResult<PaginatedResult<Broker>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM broker GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM broker \
                 ORDER BY created_at ASC \
                 LIMIT $limit START $offset",
            )
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BrokerRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_broker())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn find_label_claimants(
        &self,
        label: &str,
        except: &BrokerId,
    ) -> ImobiResult<Vec<Broker>> {
        Ok(self
            .select_claimants("subdomain = $value OR website_slug = $value", label, except)
            .await?)
    }

    async fn find_domain_claimants(
        &self,
        domain: &str,
        except: &BrokerId,
    ) -> ImobiResult<Vec<Broker>> {
        Ok(self
            .select_claimants("custom_domain = $value", domain, except)
            .await?)
    }
}

impl<C: Connection> TenantLookup for SurrealBrokerRepository<C> {
    async fn find_active_by_custom_domain(&self, domain: &str) -> ImobiResult<Option<Broker>> {
        let rows = self
            .select_where(
                "custom_domain = $value AND is_active = true",
                domain.to_ascii_lowercase(),
            )
            .await?;
        Ok(single_match(rows, "custom_domain", domain)?)
    }

    async fn find_active_by_subdomain_or_slug(&self, label: &str) -> ImobiResult<Option<Broker>> {
        let rows = self
            .select_where(
                "(subdomain = $value OR website_slug = $value) AND is_active = true",
                label.to_ascii_lowercase(),
            )
            .await?;
        Ok(single_match(rows, "subdomain", label)?)
    }

    async fn find_by_id(&self, id: &BrokerId) -> ImobiResult<Option<Broker>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('broker', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<BrokerRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .next()
            .map(|row| row.into_broker(id.clone()))
            .transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_label_lowercases_and_drops_blank() {
        assert_eq!(
            normalize_label(Some(" ImoveisAgora.com.BR ".into())),
            Some("imoveisagora.com.br".into())
        );
        assert_eq!(normalize_label(Some("   ".into())), None);
        assert_eq!(normalize_label(None), None);
    }
}
