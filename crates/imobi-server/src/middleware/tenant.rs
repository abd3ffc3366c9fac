use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header::HOST, request::Parts},
    middleware::Next,
    response::Response,
};
use imobi_core::error::ImobiError;
use imobi_tenant::{Hostname, TenantContext};

use crate::error::ApiError;
use crate::state::AppState;

const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// The hostname a request was addressed to: `Host`, else the first
/// `X-Forwarded-Host` entry.
pub fn request_hostname(headers: &HeaderMap) -> Hostname {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    Hostname::from_headers(header(HOST.as_str()), header(X_FORWARDED_HOST))
}

/// Resolve the tenant or reject the request.
pub async fn require_tenant(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let host = request_hostname(req.headers());
    let ctx = state.resolver.resolve(&host).await?;
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

/// Resolve the tenant if there is one. Only a host that matches no tenant
/// lets the request through without context.
pub async fn optional_tenant(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let host = request_hostname(req.headers());
    if let Some(ctx) = state.resolver.resolve_optional(&host).await? {
        req.extensions_mut().insert(ctx);
    }
    Ok(next.run(req).await)
}

/// The resolved tenant. Only valid on routes behind [`require_tenant`].
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantContext);

impl<S: Send + Sync> FromRequestParts<S> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .cloned()
            .map(Tenant)
            .ok_or_else(|| {
                ApiError(ImobiError::Internal(
                    "tenant context missing from request".into(),
                ))
            })
    }
}

/// The resolved tenant, if any.
#[derive(Debug, Clone)]
pub struct MaybeTenant(pub Option<TenantContext>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeTenant {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeTenant(parts.extensions.get::<TenantContext>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn host_header_wins_over_forwarded_host() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("Joao.SaaSDomain.com:8080"));
        headers.insert(X_FORWARDED_HOST, HeaderValue::from_static("other.com"));
        assert_eq!(request_hostname(&headers).as_str(), "joao.saasdomain.com");
    }

    #[test]
    fn forwarded_host_is_used_when_host_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_HOST,
            HeaderValue::from_static("imoveisagora.com.br, proxy.internal"),
        );
        assert_eq!(request_hostname(&headers).as_str(), "imoveisagora.com.br");
    }

    #[test]
    fn no_headers_give_an_empty_hostname() {
        assert!(request_hostname(&HeaderMap::new()).is_empty());
    }
}
