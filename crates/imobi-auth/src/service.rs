//! Authentication service. Resolves a bearer token to the calling user.

use imobi_core::error::{ImobiError, ImobiResult};
use imobi_core::models::broker::BrokerId;
use imobi_core::models::profile::Role;
use imobi_core::repository::ProfileRepository;
use tracing::debug;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::token;

/// The verified caller of an authenticated request.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    /// Broker the user works for, if any.
    pub broker_id: Option<BrokerId>,
}

/// Authentication service.
///
/// Generic over the profile repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<P: ProfileRepository> {
    profile_repo: P,
    config: AuthConfig,
}

impl<P: ProfileRepository> AuthService<P> {
    pub fn new(profile_repo: P, config: AuthConfig) -> Self {
        Self {
            profile_repo,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Validate the `Authorization` header value and load the caller's
    /// profile.
    ///
    /// A valid token without a stored profile authenticates as a plain
    /// `user` with no broker association.
    pub async fn authenticate(&self, authorization: Option<&str>) -> ImobiResult<AuthenticatedUser> {
        let raw = token::bearer_token(authorization)?;
        let claims = token::decode_access_token(raw, &self.config)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(format!("subject is not a UUID: {e}")))?;

        let (role, broker_id) = match self.profile_repo.get_by_id(user_id).await {
            Ok(profile) => (profile.role, profile.broker_id),
            Err(ImobiError::NotFound { .. }) => {
                debug!(%user_id, "No profile stored, defaulting to user role");
                (Role::User, None)
            }
            Err(e) => return Err(e),
        };

        Ok(AuthenticatedUser {
            id: user_id,
            email: claims.email,
            role,
            broker_id,
        })
    }
}

/// Check that the caller holds one of `allowed`.
///
/// No caller → [`AuthError::Unauthenticated`]; wrong role →
/// [`AuthError::RoleDenied`].
pub fn require_role(user: Option<&AuthenticatedUser>, allowed: &[Role]) -> Result<(), AuthError> {
    let user = user.ok_or(AuthError::Unauthenticated)?;
    if allowed.contains(&user.role) {
        Ok(())
    } else {
        Err(AuthError::RoleDenied {
            required: allowed
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(" or "),
        })
    }
}
