//! IMOBI Auth: bearer-token validation, authenticated user lookup and
//! role checks.

pub mod config;
pub mod error;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, AuthenticatedUser, require_role};
pub use token::AccessTokenClaims;
