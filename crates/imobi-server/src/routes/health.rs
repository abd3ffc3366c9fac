use axum::Json;
use chrono::{DateTime, Utc};
use imobi_core::models::broker::BrokerId;
use serde::Serialize;

use crate::middleware::MaybeTenant;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<BrokerId>,
}

pub async fn health(MaybeTenant(tenant): MaybeTenant) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        tenant_id: tenant.map(|ctx| ctx.tenant_id),
    })
}
