//! User Password Value Object
//!
//! Hashed password for storage. Delegates the cryptography to
//! `platform::password`; this wrapper keeps the PHC string out of
//! accidental `Debug`/log output and gives the domain a single type to
//! pass around.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword};
use std::fmt;

/// Hashed user password (Argon2id PHC string)
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated clear text password
    pub fn from_clear(clear: &ClearTextPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = clear
            .hash(pepper)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    /// Restore from a stored PHC string
    pub fn from_phc(s: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(s)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(Self(hashed))
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a clear text password against this hash
    pub fn verify(&self, clear: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(clear, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserPassword").field(&"[HASH]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let password = UserPassword::from_clear(&clear("hunter2!"), None).unwrap();
        assert!(password.verify(&clear("hunter2!"), None));
        assert!(!password.verify(&clear("hunter3!"), None));
    }

    #[test]
    fn test_phc_roundtrip() {
        let password = UserPassword::from_clear(&clear("roundtrip"), None).unwrap();
        let restored = UserPassword::from_phc(password.as_phc_string()).unwrap();
        assert!(restored.verify(&clear("roundtrip"), None));
    }

    #[test]
    fn test_from_phc_rejects_garbage() {
        assert!(UserPassword::from_phc("plaintext-oops").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let password = UserPassword::from_clear(&clear("secret"), None).unwrap();
        let debug = format!("{:?}", password);
        assert!(debug.contains("[HASH]"));
        assert!(!debug.contains("argon2"));
    }
}
