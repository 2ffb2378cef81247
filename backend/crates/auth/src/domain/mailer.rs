//! Mail Capability
//!
//! The core's only outbound-email need is "send a message to an
//! address"; the transport (SMTP, API relay) is deployment wiring that
//! plugs in behind this trait.

use thiserror::Error;

use crate::domain::value_object::Email;

/// Mail delivery error
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// Outbound email capability
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Deliver one message
    async fn send(&self, to: &Email, subject: &str, html_body: &str) -> Result<(), MailError>;
}
