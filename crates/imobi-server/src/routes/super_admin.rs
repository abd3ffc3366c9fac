//! Platform-wide broker management.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use imobi_core::models::broker::{Broker, BrokerId};
use imobi_core::repository::{BrokerRepository, Pagination};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::routes::DataResponse;
use crate::state::AppState;

const DEFAULT_LIMIT: u64 = 50;
const MAX_LIMIT: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl ListParams {
    fn pagination(&self) -> Pagination {
        Pagination {
            offset: self.offset.unwrap_or(0),
            limit: self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BrokerPage {
    pub data: Vec<Broker>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub async fn list_brokers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<BrokerPage>, ApiError> {
    let page = state.brokers.list(params.pagination()).await?;
    Ok(Json(BrokerPage {
        data: page.items,
        total: page.total,
        offset: page.offset,
        limit: page.limit,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub is_active: bool,
}

/// Activate or deactivate a broker. Takes effect on the next request that
/// resolves to it.
pub async fn set_broker_status(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<DataResponse<Broker>>, ApiError> {
    let broker = state
        .brokers
        .set_active(&BrokerId::new(id), body.is_active)
        .await?;
    info!(
        tenant_id = %broker.id,
        is_active = broker.is_active,
        changed_by = %user.id,
        "Broker status changed"
    );
    Ok(DataResponse::new(broker))
}
