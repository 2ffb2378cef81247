//! Mail Transport
//!
//! The log transport writes the message to the trace output instead of
//! delivering it. Deployments swap in a real transport behind the
//! `Mailer` trait; the core never sees the difference.

use crate::domain::mailer::{MailError, Mailer};
use crate::domain::value_object::Email;

/// Tracing-backed mail transport
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Mailer for LogMailer {
    async fn send(&self, to: &Email, subject: &str, html_body: &str) -> Result<(), MailError> {
        tracing::info!(to = %to, subject = subject, "Email dispatched (log transport)");
        tracing::debug!(body = html_body, "Email body");
        Ok(())
    }
}
