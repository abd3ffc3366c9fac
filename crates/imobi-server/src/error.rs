//! HTTP error envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use imobi_auth::AuthError;
use imobi_core::error::ImobiError;
use imobi_tenant::{AccessError, ResolveError};
use serde::Serialize;
use tracing::error;

/// Every failed request answers with this body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
}

#[derive(Debug)]
pub struct ApiError(pub ImobiError);

impl From<ImobiError> for ApiError {
    fn from(err: ImobiError) -> Self {
        Self(err)
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        Self(err.into())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self(ImobiError::Validation {
            message: message.into(),
        })
    }

    fn parts(self) -> (StatusCode, ErrorBody) {
        let body = |error, message: String| ErrorBody {
            error,
            message,
            hostname: None,
        };

        match self.0 {
            ImobiError::TenantNotFound { hostname } => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    error: "Tenant not found",
                    message: format!("No brokerage found for domain: {hostname}"),
                    hostname: Some(hostname),
                },
            ),
            ImobiError::TenantInactive { .. } => (
                StatusCode::FORBIDDEN,
                body(
                    "Tenant inactive",
                    "This brokerage is temporarily unavailable".into(),
                ),
            ),
            ImobiError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                body("Not found", format!("{entity} {id} not found")),
            ),
            ImobiError::AlreadyExists { entity } => (
                StatusCode::CONFLICT,
                body("Conflict", format!("{entity} already in use")),
            ),
            ImobiError::AuthenticationFailed { reason } => {
                (StatusCode::UNAUTHORIZED, body("Unauthorized", reason))
            }
            ImobiError::AuthorizationDenied { reason } => {
                (StatusCode::FORBIDDEN, body("Forbidden", reason))
            }
            ImobiError::Validation { message } => {
                (StatusCode::BAD_REQUEST, body("Bad request", message))
            }
            err @ (ImobiError::Database(_) | ImobiError::Internal(_)) => {
                error!(error = %err, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    body(
                        "Internal server error",
                        "Internal error while processing the request".into(),
                    ),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}
