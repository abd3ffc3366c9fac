use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use imobi_auth::{AuthError, AuthenticatedUser, require_role};
use imobi_core::models::profile::Role;
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Validate the bearer token and attach the caller to the request.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let user = state
        .auth
        .authenticate(authorization.as_deref())
        .await
        .inspect_err(|e| warn!(path = %req.uri().path(), error = %e, "Authentication failed"))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Must run after [`require_auth`].
pub async fn require_super_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    require_role(
        req.extensions().get::<AuthenticatedUser>(),
        &[Role::SuperAdmin],
    )?;
    Ok(next.run(req).await)
}

/// The authenticated caller. Only valid on routes behind [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}
