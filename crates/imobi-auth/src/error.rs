//! Authentication error types.

use imobi_core::error::ImobiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("access token required")]
    MissingToken,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("user is not authenticated")]
    Unauthenticated,

    #[error("role required: {required}")]
    RoleDenied { required: String },

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for ImobiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_)
            | AuthError::Unauthenticated => ImobiError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::RoleDenied { .. } => ImobiError::AuthorizationDenied {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => ImobiError::Internal(msg),
        }
    }
}
