//! Problem Access Policy
//!
//! Pure tier/ownership rules for problem mutation and answer
//! visibility.

use kernel::id::UserId;
use kernel::tier::Tier;

use crate::error::{ContestError, ContestResult};

/// Create rule: members may never author problems.
pub fn check_create_problem(actor_tier: Tier) -> ContestResult<()> {
    if actor_tier.can_author_problems() {
        Ok(())
    } else {
        Err(ContestError::PermissionDenied)
    }
}

/// Update/delete rule: members never; authors only their own problems;
/// root any problem.
pub fn check_modify_problem(
    actor_id: UserId,
    actor_tier: Tier,
    owner_id: UserId,
) -> ContestResult<()> {
    match actor_tier {
        Tier::Root => Ok(()),
        Tier::Author => {
            if owner_id == actor_id {
                Ok(())
            } else {
                Err(ContestError::PermissionDenied)
            }
        }
        Tier::Member => Err(ContestError::PermissionDenied),
    }
}

/// Answer visibility: redacted for anonymous requesters and members.
pub fn can_view_answer(viewer_tier: Option<Tier>) -> bool {
    matches!(viewer_tier, Some(tier) if tier.can_author_problems())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: i64) -> UserId {
        UserId::from_i64(n)
    }

    #[test]
    fn test_create_matrix() {
        assert!(check_create_problem(Tier::Root).is_ok());
        assert!(check_create_problem(Tier::Author).is_ok());
        assert!(check_create_problem(Tier::Member).is_err());
    }

    #[test]
    fn test_root_modifies_any_problem() {
        assert!(check_modify_problem(uid(1), Tier::Root, uid(2)).is_ok());
        assert!(check_modify_problem(uid(1), Tier::Root, uid(1)).is_ok());
    }

    #[test]
    fn test_author_modifies_only_own() {
        assert!(check_modify_problem(uid(1), Tier::Author, uid(1)).is_ok());
        assert!(check_modify_problem(uid(1), Tier::Author, uid(2)).is_err());
    }

    #[test]
    fn test_member_modifies_nothing() {
        assert!(check_modify_problem(uid(1), Tier::Member, uid(1)).is_err());
        assert!(check_modify_problem(uid(1), Tier::Member, uid(2)).is_err());
    }

    #[test]
    fn test_answer_visibility() {
        assert!(!can_view_answer(None));
        assert!(!can_view_answer(Some(Tier::Member)));
        assert!(can_view_answer(Some(Tier::Author)));
        assert!(can_view_answer(Some(Tier::Root)));
    }
}
