//! User Entity

use kernel::id::UserId;
use kernel::tier::Tier;

use crate::domain::value_object::{Email, UserName, UserPassword};

/// User entity
///
/// Identity plus its permission tier and credential hash. The set of
/// solved problems is a relation owned by the contest domain, not a
/// field here.
#[derive(Debug, Clone)]
pub struct User {
    /// Database-assigned identifier
    pub id: UserId,
    /// Unique name (login and display)
    pub name: UserName,
    /// Optional unique email; gates the most sensitive endpoints
    pub email: Option<Email>,
    /// Argon2id password hash
    pub password: UserPassword,
    /// Permission tier (0 = root)
    pub tier: Tier,
}

impl User {
    /// Whether a contact channel is on file
    pub fn has_email(&self) -> bool {
        self.email.is_some()
    }
}

/// User about to be inserted; the database assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Option<Email>,
    pub password: UserPassword,
    pub tier: Tier,
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn sample_user(email: Option<&str>) -> User {
        let clear = ClearTextPassword::new("pw123456".to_string()).unwrap();
        User {
            id: UserId::from_i64(1),
            name: UserName::new("alice").unwrap(),
            email: email.map(|e| Email::new(e).unwrap()),
            password: UserPassword::from_clear(&clear, None).unwrap(),
            tier: Tier::Member,
        }
    }

    #[test]
    fn test_has_email() {
        assert!(!sample_user(None).has_email());
        assert!(sample_user(Some("a@example.com")).has_email());
    }
}
