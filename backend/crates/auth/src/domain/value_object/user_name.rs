//! User Name Value Object

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum name length
const NAME_MIN_LENGTH: usize = 2;
/// Maximum name length
const NAME_MAX_LENGTH: usize = 16;

/// User name, unique across the platform.
///
/// 2 to 16 word characters (ASCII letters, digits, underscore).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();

        let len = name.chars().count();
        if !(NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&len) {
            return Err(AppError::bad_request(format!(
                "Name must be {} to {} characters",
                NAME_MIN_LENGTH, NAME_MAX_LENGTH
            )));
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(AppError::bad_request(
                "Name may only contain letters, digits and underscores",
            ));
        }

        Ok(Self(name))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserName {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        UserName::new(s)
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_valid() {
        assert!(UserName::new("ab").is_ok());
        assert!(UserName::new("player_1").is_ok());
        assert!(UserName::new("A1_b2_C3").is_ok());
        assert!(UserName::new("a".repeat(16)).is_ok());
    }

    #[test]
    fn test_user_name_length_bounds() {
        assert!(UserName::new("a").is_err());
        assert!(UserName::new("").is_err());
        assert!(UserName::new("a".repeat(17)).is_err());
    }

    #[test]
    fn test_user_name_charset() {
        assert!(UserName::new("with space").is_err());
        assert!(UserName::new("with-dash").is_err());
        assert!(UserName::new("with@at").is_err());
    }

    #[test]
    fn test_user_name_display() {
        let name = UserName::new("alice").unwrap();
        assert_eq!(name.to_string(), "alice");
        assert_eq!(name.as_str(), "alice");
    }
}
