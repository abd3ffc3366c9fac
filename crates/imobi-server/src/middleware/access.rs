use axum::{extract::Request, middleware::Next, response::Response};
use imobi_auth::AuthenticatedUser;
use imobi_tenant::{TenantContext, validate_tenant_access};
use tracing::warn;

use crate::error::ApiError;

/// Reject callers whose profile belongs to a different broker than the
/// resolved tenant. Must run after both [`require_auth`] and
/// [`require_tenant`].
///
/// [`require_auth`]: super::require_auth
/// [`require_tenant`]: super::require_tenant
pub async fn require_tenant_access(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req.extensions().get::<AuthenticatedUser>();
    let tenant = req.extensions().get::<TenantContext>();

    if let Err(e) = validate_tenant_access(user.and_then(|u| u.broker_id.as_ref()), tenant) {
        warn!(
            user_id = ?user.map(|u| u.id),
            tenant_id = ?tenant.map(|t| t.tenant_id.as_str()),
            reason = %e,
            "Tenant access denied"
        );
        return Err(e.into());
    }

    Ok(next.run(req).await)
}
