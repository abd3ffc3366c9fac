//! Tenant identification and self-service settings.

use axum::{
    Json,
    extract::{Query, State},
};
use imobi_core::error::ImobiError;
use imobi_core::models::broker::{Broker, PublicBrokerInfo, UpdateBroker};
use imobi_core::repository::BrokerRepository;
use imobi_tenant::Hostname;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::routes::DataResponse;
use crate::state::AppState;

const MAX_SLUG_LEN: usize = 50;

#[derive(Debug, Deserialize)]
pub struct IdentifyParams {
    pub domain: Option<String>,
}

/// Look up the tenant for a domain named in the query string, for
/// frontends that are not served from the tenant's own host.
pub async fn identify(
    State(state): State<AppState>,
    Query(params): Query<IdentifyParams>,
) -> Result<Json<DataResponse<PublicBrokerInfo>>, ApiError> {
    let domain = params
        .domain
        .as_deref()
        .and_then(normalize_domain)
        .ok_or_else(|| ApiError::validation("Missing domain parameter"))?;

    let ctx = state.resolver.identify(&Hostname::parse(&domain)).await?;
    Ok(DataResponse::new(PublicBrokerInfo::from(&ctx.tenant)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub website_slug: Option<String>,
    /// An empty string clears the domain.
    pub custom_domain: Option<String>,
}

/// Change the caller's own website slug and custom domain.
pub async fn update_settings(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UpdateSettingsRequest>,
) -> Result<Json<DataResponse<Broker>>, ApiError> {
    let broker_id = user.broker_id.ok_or(ImobiError::AuthorizationDenied {
        reason: "user is not associated with a broker".into(),
    })?;

    if body.website_slug.is_none() && body.custom_domain.is_none() {
        return Err(ApiError::validation("Nothing to update"));
    }

    let mut update = UpdateBroker::default();

    if let Some(slug) = body.website_slug {
        if !is_valid_slug(&slug) {
            return Err(ApiError::validation("Invalid slug format"));
        }
        // A slug is served under the subdomain tier, so it collides with
        // other brokers' subdomains as well as their slugs.
        let claimants = state.brokers.find_label_claimants(&slug, &broker_id).await?;
        if !claimants.is_empty() {
            return Err(ImobiError::AlreadyExists {
                entity: "Slug".into(),
            }
            .into());
        }
        update.website_slug = Some(Some(slug));
    }

    if let Some(raw) = body.custom_domain {
        let domain = normalize_domain(&raw);
        if let Some(domain) = &domain {
            let claimants = state.brokers.find_domain_claimants(domain, &broker_id).await?;
            if !claimants.is_empty() {
                return Err(ImobiError::AlreadyExists {
                    entity: "Custom domain".into(),
                }
                .into());
            }
        }
        update.custom_domain = Some(domain);
    }

    let broker = state.brokers.update(&broker_id, update).await?;
    info!(
        tenant_id = %broker.id,
        user_id = %user.id,
        website_slug = ?broker.website_slug,
        custom_domain = ?broker.custom_domain,
        "Tenant settings updated"
    );
    Ok(DataResponse::new(broker))
}

/// 1 to 50 characters of `a-z`, `0-9` or `-`.
fn is_valid_slug(slug: &str) -> bool {
    (1..=MAX_SLUG_LEN).contains(&slug.len())
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Reduce user input such as `https://Example.com/` to `example.com`.
/// Returns `None` for blank input.
fn normalize_domain(raw: &str) -> Option<String> {
    let lower = raw.trim().to_ascii_lowercase();
    let host = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let host = host.trim_end_matches('/').trim();
    (!host.is_empty()).then(|| host.to_string())
}
