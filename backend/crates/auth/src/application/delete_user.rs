//! Delete User Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::policy;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Delete user use case
pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, actor: &User, target_id: UserId) -> AuthResult<()> {
        let target = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        policy::check_delete_user(actor.tier, target.tier)?;

        self.user_repo.delete(target.id).await?;

        tracing::info!(
            actor_id = %actor.id,
            target_id = %target.id,
            "User deleted"
        );

        Ok(())
    }
}
