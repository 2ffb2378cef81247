//! Create User Use Case
//!
//! Registration. Permission check first, uniqueness second; a race
//! losing to the unique index still lands as Conflict via the
//! repository's constraint mapping.

use std::sync::Arc;

use kernel::tier::Tier;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::policy;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Registration input
pub struct CreateUserInput {
    pub name: String,
    pub password: String,
    pub permission: Tier,
}

/// Create user use case
pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, actor: Option<&User>, input: CreateUserInput) -> AuthResult<User> {
        policy::check_create_user(actor.map(|u| u.tier), input.permission)?;

        let name = UserName::new(input.name)
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        if self.user_repo.exists_by_name(name.as_str()).await? {
            return Err(AuthError::NameTaken);
        }

        let clear = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let password = UserPassword::from_clear(&clear, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = self
            .user_repo
            .create(&NewUser {
                name,
                email: None,
                password,
                tier: input.permission,
            })
            .await?;

        tracing::info!(
            user_id = %user.id,
            name = %user.name,
            tier = %user.tier,
            "User registered"
        );

        Ok(user)
    }
}
