use axum::Json;
use imobi_core::models::broker::PublicBrokerInfo;

use crate::middleware::Tenant;
use crate::routes::DataResponse;

/// Branding of the tenant the request resolved to.
pub async fn tenant_info(Tenant(ctx): Tenant) -> Json<DataResponse<PublicBrokerInfo>> {
    DataResponse::new(PublicBrokerInfo::from(&ctx.tenant))
}
