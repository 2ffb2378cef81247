//! Update User Use Case
//!
//! Profile updates. Order of checks: tier policy, then confirmation
//! proofs for sensitive fields (self-updates only), then uniqueness,
//! then the write. Confirmation rows are consumed once every required
//! proof has passed.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::tier::Tier;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::policy;
use crate::domain::repository::{ConfirmationRepository, UserRepository};
use crate::domain::value_object::{Email, Purpose, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

/// Partial update; absent fields are left untouched
#[derive(Default)]
pub struct UpdateUserInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub permission: Option<Tier>,
    pub password: Option<String>,
}

/// Confirmation codes supplied in the `email-token` / `email-token1`
/// request headers
#[derive(Debug, Clone, Default)]
pub struct ConfirmationCodes {
    pub email_token: Option<String>,
    pub email_token1: Option<String>,
}

/// One proof a sensitive update must present: a fresh confirmation for
/// (email, purpose) matching the supplied code.
#[derive(Debug, PartialEq, Eq)]
struct RequiredProof {
    email: String,
    purpose: Purpose,
    supplied: Option<String>,
}

/// Update user use case
pub struct UpdateUserUseCase<U, C>
where
    U: UserRepository,
    C: ConfirmationRepository,
{
    user_repo: Arc<U>,
    confirmation_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> UpdateUserUseCase<U, C>
where
    U: UserRepository,
    C: ConfirmationRepository,
{
    pub fn new(user_repo: Arc<U>, confirmation_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            confirmation_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        actor: &User,
        target_id: UserId,
        input: UpdateUserInput,
        codes: ConfirmationCodes,
    ) -> AuthResult<User> {
        let mut target = self
            .user_repo
            .find_by_id(target_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let new_name = input
            .name
            .map(UserName::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;
        let new_email = input
            .email
            .map(Email::new)
            .transpose()
            .map_err(|e| AuthError::Validation(e.message().to_string()))?;

        policy::check_update_user(actor.id, actor.tier, target.id, target.tier, input.permission)?;

        // Confirmation-gated fields apply to self-updates only;
        // administrative overrides skip them
        if actor.id == target.id {
            let proofs = required_proofs(
                target.email.as_ref(),
                new_email.as_ref(),
                input.password.is_some(),
                &codes,
            )?;
            self.verify_and_consume(&proofs).await?;
        }

        if let Some(name) = new_name {
            if name != target.name && self.user_repo.exists_by_name(name.as_str()).await? {
                return Err(AuthError::NameTaken);
            }
            target.name = name;
        }

        if let Some(email) = new_email {
            if target.email.as_ref() != Some(&email)
                && self.user_repo.exists_by_email(email.as_str()).await?
            {
                return Err(AuthError::EmailTaken);
            }
            target.email = Some(email);
        }

        if let Some(tier) = input.permission {
            target.tier = tier;
        }

        if let Some(password) = input.password {
            let clear = ClearTextPassword::new(password)
                .map_err(|e| AuthError::Validation(e.to_string()))?;
            target.password = UserPassword::from_clear(&clear, self.config.pepper())
                .map_err(|e| AuthError::Internal(e.to_string()))?;
        }

        self.user_repo.update(&target).await?;

        tracing::info!(
            actor_id = %actor.id,
            target_id = %target.id,
            "User updated"
        );

        Ok(target)
    }

    /// Check every proof, then consume the rows. Consumption happens only
    /// after all proofs pass so a half-valid request burns nothing.
    async fn verify_and_consume(&self, proofs: &[RequiredProof]) -> AuthResult<()> {
        for proof in proofs {
            let supplied = proof
                .supplied
                .as_deref()
                .ok_or(AuthError::InvalidConfirmation)?;

            let confirmation = self
                .confirmation_repo
                .find_fresh(&proof.email, proof.purpose, self.config.confirmation_ttl)
                .await?
                .ok_or(AuthError::InvalidConfirmation)?;

            if !confirmation.matches(supplied) {
                return Err(AuthError::InvalidConfirmation);
            }
        }

        for proof in proofs {
            self.confirmation_repo
                .delete(&proof.email, proof.purpose)
                .await?;
        }

        Ok(())
    }
}

/// Derive which (email, purpose) proofs this update must present.
///
/// - email change (old -> new): MODIFY on the old address + BIND on the new
/// - email bind (none -> new): BIND on the new address
/// - password change: MODIFY on the current address (deduplicated against
///   the email-change MODIFY, which proves the same control)
fn required_proofs(
    current_email: Option<&Email>,
    new_email: Option<&Email>,
    password_change: bool,
    codes: &ConfirmationCodes,
) -> AuthResult<Vec<RequiredProof>> {
    let mut proofs: Vec<RequiredProof> = Vec::new();

    match (current_email, new_email) {
        (Some(old), Some(new)) => {
            proofs.push(RequiredProof {
                email: old.as_str().to_string(),
                purpose: Purpose::Modify,
                supplied: codes.email_token.clone(),
            });
            proofs.push(RequiredProof {
                email: new.as_str().to_string(),
                purpose: Purpose::Bind,
                supplied: codes.email_token1.clone(),
            });
        }
        (None, Some(new)) => {
            proofs.push(RequiredProof {
                email: new.as_str().to_string(),
                purpose: Purpose::Bind,
                supplied: codes.email_token.clone(),
            });
        }
        _ => {}
    }

    if password_change {
        // Keyed on the address currently on file; no email, no way to
        // prove the change
        let current = current_email.ok_or(AuthError::InvalidConfirmation)?;
        let already_required = proofs
            .iter()
            .any(|p| p.email == current.as_str() && p.purpose == Purpose::Modify);
        if !already_required {
            proofs.push(RequiredProof {
                email: current.as_str().to_string(),
                purpose: Purpose::Modify,
                supplied: codes.email_token.clone(),
            });
        }
    }

    Ok(proofs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::new(s).unwrap()
    }

    fn codes(token: Option<&str>, token1: Option<&str>) -> ConfirmationCodes {
        ConfirmationCodes {
            email_token: token.map(str::to_string),
            email_token1: token1.map(str::to_string),
        }
    }

    #[test]
    fn test_no_sensitive_fields_no_proofs() {
        let proofs = required_proofs(None, None, false, &codes(None, None)).unwrap();
        assert!(proofs.is_empty());

        let current = email("old@example.com");
        let proofs = required_proofs(Some(&current), None, false, &codes(None, None)).unwrap();
        assert!(proofs.is_empty());
    }

    #[test]
    fn test_email_change_needs_modify_plus_bind() {
        let old = email("old@example.com");
        let new = email("new@example.com");
        let proofs =
            required_proofs(Some(&old), Some(&new), false, &codes(Some("111111"), Some("222222")))
                .unwrap();

        assert_eq!(proofs.len(), 2);
        assert_eq!(proofs[0].email, "old@example.com");
        assert_eq!(proofs[0].purpose, Purpose::Modify);
        assert_eq!(proofs[0].supplied.as_deref(), Some("111111"));
        assert_eq!(proofs[1].email, "new@example.com");
        assert_eq!(proofs[1].purpose, Purpose::Bind);
        assert_eq!(proofs[1].supplied.as_deref(), Some("222222"));
    }

    #[test]
    fn test_first_bind_needs_bind_on_new() {
        let new = email("new@example.com");
        let proofs =
            required_proofs(None, Some(&new), false, &codes(Some("111111"), None)).unwrap();

        assert_eq!(proofs.len(), 1);
        assert_eq!(proofs[0].email, "new@example.com");
        assert_eq!(proofs[0].purpose, Purpose::Bind);
    }

    #[test]
    fn test_password_change_keyed_on_current_email() {
        let current = email("me@example.com");
        let proofs =
            required_proofs(Some(&current), None, true, &codes(Some("111111"), None)).unwrap();

        assert_eq!(proofs.len(), 1);
        assert_eq!(proofs[0].email, "me@example.com");
        assert_eq!(proofs[0].purpose, Purpose::Modify);
    }

    #[test]
    fn test_password_change_without_email_fails() {
        let result = required_proofs(None, None, true, &codes(Some("111111"), None));
        assert!(matches!(result, Err(AuthError::InvalidConfirmation)));
    }

    #[test]
    fn test_combined_email_and_password_change_dedupes_modify() {
        let old = email("old@example.com");
        let new = email("new@example.com");
        let proofs =
            required_proofs(Some(&old), Some(&new), true, &codes(Some("111111"), Some("222222")))
                .unwrap();

        // The MODIFY on the old address covers the password change too
        assert_eq!(proofs.len(), 2);
    }
}
