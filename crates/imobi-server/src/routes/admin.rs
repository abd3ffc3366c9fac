//! Dashboard routes, scoped to the resolved tenant.

use axum::{Json, extract::State};
use imobi_core::models::broker::{Broker, UpdateBroker};
use imobi_core::repository::BrokerRepository;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::ApiError;
use crate::middleware::{CurrentUser, Tenant};
use crate::routes::DataResponse;
use crate::state::AppState;

pub async fn current_tenant(Tenant(ctx): Tenant) -> Json<DataResponse<Broker>> {
    DataResponse::new(ctx.tenant)
}

/// Website customization. Omitted fields are left alone; an empty string
/// clears a text field.
#[derive(Debug, Deserialize)]
pub struct UpdateSiteRequest {
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub site_favicon_url: Option<String>,
    pub theme_settings: Option<Value>,
}

pub async fn update_site(
    State(state): State<AppState>,
    Tenant(ctx): Tenant,
    CurrentUser(user): CurrentUser,
    Json(body): Json<UpdateSiteRequest>,
) -> Result<Json<DataResponse<Broker>>, ApiError> {
    if body.theme_settings.as_ref().is_some_and(|v| !v.is_object()) {
        return Err(ApiError::validation("theme_settings must be a JSON object"));
    }

    let update = UpdateBroker {
        site_title: body.site_title.map(blank_to_none),
        site_description: body.site_description.map(blank_to_none),
        site_favicon_url: body.site_favicon_url.map(blank_to_none),
        theme_settings: body.theme_settings,
        ..Default::default()
    };

    let broker = state.brokers.update(&ctx.tenant_id, update).await?;
    info!(tenant_id = %broker.id, user_id = %user.id, "Website settings updated");
    Ok(DataResponse::new(broker))
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
