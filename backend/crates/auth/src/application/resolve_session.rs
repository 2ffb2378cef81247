//! Resolve Session Use Case
//!
//! Turns an optional bearer token into the current user. One resolver,
//! three policies; the variants differ only in how they treat an absent
//! token and an unbound email.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// How strictly the current request needs an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPolicy {
    /// Absent token is fine; invalid or expired tokens still fail
    Optional,
    /// A valid token is required
    Required,
    /// A valid token for a user with a bound email is required
    RequiredWithEmail,
}

/// Resolve session use case
pub struct ResolveSessionUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ResolveSessionUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Resolve the current user, if any
    pub async fn execute(
        &self,
        token: Option<&str>,
        policy: SessionPolicy,
    ) -> AuthResult<Option<User>> {
        let Some(token) = token else {
            return match policy {
                SessionPolicy::Optional => Ok(None),
                SessionPolicy::Required | SessionPolicy::RequiredWithEmail => {
                    Err(AuthError::NotAuthenticated)
                }
            };
        };

        let user_id = TokenService::new(&self.config).verify(token)?;

        // A signed token whose subject no longer exists is as good as forged
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        if policy == SessionPolicy::RequiredWithEmail && !user.has_email() {
            return Err(AuthError::EmailNotBound);
        }

        Ok(Some(user))
    }

    /// Resolve under a non-optional policy and unwrap the user
    pub async fn require(&self, token: Option<&str>, policy: SessionPolicy) -> AuthResult<User> {
        self.execute(token, policy)
            .await?
            .ok_or(AuthError::NotAuthenticated)
    }
}
