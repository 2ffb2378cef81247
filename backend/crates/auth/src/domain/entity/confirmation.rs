//! Confirmation Entity
//!
//! One live row per (email, purpose); re-issuing overwrites the row and
//! resets its timestamp. Expired rows stay in storage but are excluded
//! from lookups.

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::domain::value_object::{Email, Purpose};

/// A short-lived one-time code proving control of an email address
/// for a stated purpose.
#[derive(Debug, Clone)]
pub struct Confirmation {
    pub email: Email,
    pub purpose: Purpose,
    /// 6 decimal digits
    pub token: String,
    /// Creation or last-refresh time
    pub create_time: DateTime<Utc>,
}

impl Confirmation {
    /// Create a confirmation stamped with the current time
    pub fn new(email: Email, purpose: Purpose, token: String) -> Self {
        Self {
            email,
            purpose,
            token,
            create_time: Utc::now(),
        }
    }

    /// Still within the validity window at `now`
    pub fn is_fresh_at(&self, now: DateTime<Utc>, window: Duration) -> bool {
        let age = now.signed_duration_since(self.create_time);
        match chrono::Duration::from_std(window) {
            Ok(window) => age <= window,
            Err(_) => false,
        }
    }

    /// Still within the validity window now
    pub fn is_fresh(&self, window: Duration) -> bool {
        self.is_fresh_at(Utc::now(), window)
    }

    /// Compare a supplied code against the stored token in constant time
    pub fn matches(&self, code: &str) -> bool {
        platform::crypto::constant_time_eq(self.token.as_bytes(), code.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirmation() -> Confirmation {
        Confirmation::new(
            Email::new("user@example.com").unwrap(),
            Purpose::Bind,
            "123456".to_string(),
        )
    }

    #[test]
    fn test_fresh_within_window() {
        let conf = confirmation();
        let window = Duration::from_secs(300);

        assert!(conf.is_fresh_at(conf.create_time + chrono::Duration::seconds(299), window));
        // Boundary: now - created == window still counts
        assert!(conf.is_fresh_at(conf.create_time + chrono::Duration::seconds(300), window));
        assert!(!conf.is_fresh_at(conf.create_time + chrono::Duration::seconds(301), window));
    }

    #[test]
    fn test_matches() {
        let conf = confirmation();
        assert!(conf.matches("123456"));
        assert!(!conf.matches("123457"));
        assert!(!conf.matches("12345"));
        assert!(!conf.matches(""));
    }
}
