//! Confirmation Purpose Value Object
//!
//! A confirmation code only proves control of an address *for a stated
//! purpose*; a LOGIN code cannot be replayed to bind an address.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Purpose {
    /// Sign in with an emailed code instead of a password
    Login,
    /// Bind an email address to an account
    Bind,
    /// Change a sensitive field (existing email, password)
    Modify,
}

impl Purpose {
    /// Wire/storage code for this purpose
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Purpose::*;
        match self {
            Login => "LOGIN",
            Bind => "BIND",
            Modify => "MODIFY",
        }
    }

    /// Parse a storage code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        use Purpose::*;
        match code {
            "LOGIN" => Some(Login),
            "BIND" => Some(Bind),
            "MODIFY" => Some(Modify),
            _ => None,
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purpose_codes() {
        assert_eq!(Purpose::Login.code(), "LOGIN");
        assert_eq!(Purpose::Bind.code(), "BIND");
        assert_eq!(Purpose::Modify.code(), "MODIFY");
    }

    #[test]
    fn test_purpose_from_code() {
        assert_eq!(Purpose::from_code("LOGIN"), Some(Purpose::Login));
        assert_eq!(Purpose::from_code("BIND"), Some(Purpose::Bind));
        assert_eq!(Purpose::from_code("MODIFY"), Some(Purpose::Modify));
        assert_eq!(Purpose::from_code("login"), None);
        assert_eq!(Purpose::from_code(""), None);
    }

    #[test]
    fn test_purpose_serde() {
        assert_eq!(serde_json::to_string(&Purpose::Bind).unwrap(), r#""BIND""#);
        let purpose: Purpose = serde_json::from_str(r#""MODIFY""#).unwrap();
        assert_eq!(purpose, Purpose::Modify);
        assert!(serde_json::from_str::<Purpose>(r#""DELETE""#).is_err());
    }
}
