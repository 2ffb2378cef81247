//! Issue Token Use Case
//!
//! Login: exchanges an account identifier plus a password (or a fresh
//! emailed LOGIN code) for a bearer token.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::{ConfirmationRepository, UserRepository};
use crate::domain::value_object::Purpose;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct IssueTokenInput {
    /// Account: user name, or email when it contains '@'
    pub account: String,
    /// Password, or a 6-digit LOGIN confirmation code for email accounts
    pub password: String,
}

/// Login output
pub struct IssueTokenOutput {
    pub access_token: String,
    pub token_type: String,
}

/// Issue token use case
pub struct IssueTokenUseCase<U, C>
where
    U: UserRepository,
    C: ConfirmationRepository,
{
    user_repo: Arc<U>,
    confirmation_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> IssueTokenUseCase<U, C>
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

    pub async fn execute(&self, input: IssueTokenInput) -> AuthResult<IssueTokenOutput> {
        let is_email_account = input.account.contains('@');

        // Emails are stored lowercased; names are case-sensitive
        let account = if is_email_account {
            input.account.trim().to_lowercase()
        } else {
            input.account.clone()
        };

        let user = if is_email_account {
            self.user_repo.find_by_email(&account).await?
        } else {
            self.user_repo.find_by_name(&account).await?
        };

        // Unknown accounts and bad passwords answer identically
        let user = user.ok_or(AuthError::InvalidCredentials)?;

        // An email account presenting a 6-digit "password" may be redeeming
        // a LOGIN confirmation code
        if is_email_account && is_six_digit_code(&input.password) {
            let confirmation = self
                .confirmation_repo
                .find_fresh(&account, Purpose::Login, self.config.confirmation_ttl)
                .await?;

            if let Some(confirmation) = confirmation {
                if confirmation.matches(&input.password) {
                    // Single-use: consume before issuing
                    self.confirmation_repo
                        .delete(&account, Purpose::Login)
                        .await?;

                    tracing::info!(user_id = %user.id, "Login via email code");
                    return Ok(self.issue_for(user.id));
                }
            }
        }

        let clear = ClearTextPassword::new(input.password)
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !user.password.verify(&clear, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        tracing::info!(user_id = %user.id, "Login via password");
        Ok(self.issue_for(user.id))
    }

    fn issue_for(&self, user_id: kernel::id::UserId) -> IssueTokenOutput {
        IssueTokenOutput {
            access_token: TokenService::new(&self.config).issue(user_id),
            token_type: "bearer".to_string(),
        }
    }
}

fn is_six_digit_code(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_six_digit_code() {
        assert!(is_six_digit_code("123456"));
        assert!(is_six_digit_code("000000"));
        assert!(!is_six_digit_code("12345"));
        assert!(!is_six_digit_code("1234567"));
        assert!(!is_six_digit_code("12345a"));
        assert!(!is_six_digit_code(""));
    }
}
