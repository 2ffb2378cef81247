//! Send Confirmation Use Case
//!
//! Issues a 6-digit confirmation code for (email, purpose) and delivers
//! it through the mail capability. At most one live code per pair: a
//! fresh row blocks re-issue until the window elapses, after which the
//! upsert overwrites it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::confirmation::Confirmation;
use crate::domain::mailer::Mailer;
use crate::domain::repository::ConfirmationRepository;
use crate::domain::value_object::{Email, Purpose};
use crate::error::{AuthError, AuthResult};

/// Confirmation code length
const CODE_LEN: usize = 6;

/// Send confirmation use case
pub struct SendConfirmationUseCase<C, M>
where
    C: ConfirmationRepository,
    M: Mailer,
{
    confirmation_repo: Arc<C>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<C, M> SendConfirmationUseCase<C, M>
where
    C: ConfirmationRepository,
    M: Mailer,
{
    pub fn new(confirmation_repo: Arc<C>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            confirmation_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, email: Email, purpose: Purpose) -> AuthResult<()> {
        let existing = self
            .confirmation_repo
            .find_fresh(email.as_str(), purpose, self.config.confirmation_ttl)
            .await?;

        if existing.is_some() {
            return Err(AuthError::ConfirmationPending);
        }

        let code = platform::crypto::random_digit_code(CODE_LEN);
        let confirmation = Confirmation::new(email.clone(), purpose, code.clone());

        // Ledger first, then delivery. A failed delivery removes the row
        // again so the caller can retry immediately.
        self.confirmation_repo.upsert(&confirmation).await?;

        let (subject, body) = render_message(purpose, &code);
        if let Err(e) = self.mailer.send(&email, subject, &body).await {
            self.confirmation_repo
                .delete(email.as_str(), purpose)
                .await?;
            return Err(AuthError::MailDelivery(e.to_string()));
        }

        tracing::info!(email = %email, purpose = %purpose, "Confirmation code issued");
        Ok(())
    }
}

fn render_message(purpose: Purpose, code: &str) -> (&'static str, String) {
    let (subject, lead) = match purpose {
        Purpose::Login => ("New sign-in", "Enter the verification code to sign in:"),
        Purpose::Bind => ("New email binding", "Enter the verification code to bind your email:"),
        Purpose::Modify => (
            "Account change",
            "Enter the verification code to change your account:",
        ),
    };

    let body = format!(
        r#"<html>
<body>
<b style="font-size: 24px;">{}</b>
<div style="text-align: center">
    <span style="vertical-align: center; font-size: 24px;">{}</span>
</div>
</body>
</html>
"#,
        lead, code
    );

    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message_embeds_code() {
        for purpose in [Purpose::Login, Purpose::Bind, Purpose::Modify] {
            let (subject, body) = render_message(purpose, "987654");
            assert!(!subject.is_empty());
            assert!(body.contains("987654"));
        }
    }

    #[test]
    fn test_render_message_distinct_subjects() {
        let (login, _) = render_message(Purpose::Login, "1");
        let (bind, _) = render_message(Purpose::Bind, "1");
        let (modify, _) = render_message(Purpose::Modify, "1");
        assert_ne!(login, bind);
        assert_ne!(bind, modify);
    }
}
