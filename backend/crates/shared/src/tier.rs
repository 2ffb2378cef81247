//! Permission Tier
//!
//! Ordered permission level shared by the user and problem domains.
//! Lower numeric value means more privilege (0 is root). All comparisons
//! go through the named helpers below; raw `<`/`>` on the ids is how the
//! sign errors creep in.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
#[repr(i16)]
pub enum Tier {
    /// Full control, may act on any user or problem.
    Root = 0,
    /// May author problems and manage the ones it owns.
    Author = 1,
    /// Regular participant. The only tier anonymous registration may pick.
    #[default]
    Member = 2,
}

impl Tier {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        use Tier::*;
        match self {
            Root => "root",
            Author => "author",
            Member => "member",
        }
    }

    /// Strictly more privileged than `other` (numerically smaller).
    #[inline]
    pub const fn more_trusted_than(&self, other: Tier) -> bool {
        self.id() < other.id()
    }

    /// At least as privileged as `other`.
    #[inline]
    pub const fn at_least(&self, other: Tier) -> bool {
        self.id() <= other.id()
    }

    /// Tiers allowed to author problems and see stored answers.
    #[inline]
    pub const fn can_author_problems(&self) -> bool {
        self.at_least(Tier::Author)
    }

    /// Load from a database value. The column carries a CHECK constraint,
    /// so anything else is corruption.
    #[inline]
    pub fn from_id(id: i16) -> Self {
        match Tier::try_from(id) {
            Ok(tier) => tier,
            Err(_) => {
                tracing::error!("Invalid Tier id: {}", id);
                unreachable!("Invalid Tier id: {}", id)
            }
        }
    }
}

impl TryFrom<i16> for Tier {
    type Error = String;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        use Tier::*;
        match id {
            0 => Ok(Root),
            1 => Ok(Author),
            2 => Ok(Member),
            other => Err(format!("permission must be 0..=2, got {}", other)),
        }
    }
}

impl From<Tier> for i16 {
    fn from(tier: Tier) -> Self {
        tier.id()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ids() {
        assert_eq!(Tier::Root.id(), 0);
        assert_eq!(Tier::Author.id(), 1);
        assert_eq!(Tier::Member.id(), 2);
    }

    #[test]
    fn test_tier_try_from() {
        assert_eq!(Tier::try_from(0), Ok(Tier::Root));
        assert_eq!(Tier::try_from(1), Ok(Tier::Author));
        assert_eq!(Tier::try_from(2), Ok(Tier::Member));
        assert!(Tier::try_from(-1).is_err());
        assert!(Tier::try_from(3).is_err());
    }

    #[test]
    fn test_more_trusted_than() {
        assert!(Tier::Root.more_trusted_than(Tier::Author));
        assert!(Tier::Root.more_trusted_than(Tier::Member));
        assert!(Tier::Author.more_trusted_than(Tier::Member));

        assert!(!Tier::Author.more_trusted_than(Tier::Root));
        assert!(!Tier::Member.more_trusted_than(Tier::Author));
        // Not reflexive
        assert!(!Tier::Author.more_trusted_than(Tier::Author));
    }

    #[test]
    fn test_at_least() {
        assert!(Tier::Root.at_least(Tier::Member));
        assert!(Tier::Author.at_least(Tier::Author));
        assert!(!Tier::Member.at_least(Tier::Author));
    }

    #[test]
    fn test_can_author_problems() {
        assert!(Tier::Root.can_author_problems());
        assert!(Tier::Author.can_author_problems());
        assert!(!Tier::Member.can_author_problems());
    }

    #[test]
    fn test_tier_serde() {
        let json = serde_json::to_string(&Tier::Author).unwrap();
        assert_eq!(json, "1");
        let tier: Tier = serde_json::from_str("2").unwrap();
        assert_eq!(tier, Tier::Member);
        assert!(serde_json::from_str::<Tier>("3").is_err());
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Root.to_string(), "root");
        assert_eq!(Tier::Author.to_string(), "author");
        assert_eq!(Tier::Member.to_string(), "member");
    }
}
