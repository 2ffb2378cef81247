//! Access Control Policy
//!
//! Pure permission-tier rules for every mutating user operation. These
//! functions see only (actor, target, requested change) and touch no
//! storage, which is what keeps them testable against the full scenario
//! matrix.

use kernel::id::UserId;
use kernel::tier::Tier;

use crate::error::{AuthError, AuthResult};

/// Create-user rule.
///
/// Anonymous actors may only register at the least privileged tier.
/// Authenticated actors may only create users at a tier strictly less
/// privileged than their own.
pub fn check_create_user(actor: Option<Tier>, requested: Tier) -> AuthResult<()> {
    match actor {
        None => {
            if requested == Tier::Member {
                Ok(())
            } else {
                Err(AuthError::PermissionDenied)
            }
        }
        Some(actor) => {
            if actor.more_trusted_than(requested) {
                Ok(())
            } else {
                Err(AuthError::PermissionDenied)
            }
        }
    }
}

/// Update-user rule.
///
/// A strictly less privileged target may be updated outright
/// (administrative override); otherwise the actor must be the target.
/// Any requested tier must be strictly less privileged than the actor's
/// current tier, in both the self and the override case.
pub fn check_update_user(
    actor_id: UserId,
    actor_tier: Tier,
    target_id: UserId,
    target_tier: Tier,
    requested_tier: Option<Tier>,
) -> AuthResult<()> {
    if actor_id != target_id && !actor_tier.more_trusted_than(target_tier) {
        return Err(AuthError::PermissionDenied);
    }

    if let Some(requested) = requested_tier {
        if !actor_tier.more_trusted_than(requested) {
            return Err(AuthError::PermissionDenied);
        }
    }

    Ok(())
}

/// Delete-user rule: only strictly less privileged targets.
pub fn check_delete_user(actor_tier: Tier, target_tier: Tier) -> AuthResult<()> {
    if actor_tier.more_trusted_than(target_tier) {
        Ok(())
    } else {
        Err(AuthError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(n: i64) -> UserId {
        UserId::from_i64(n)
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    #[test]
    fn test_anonymous_may_only_create_member() {
        assert!(check_create_user(None, Tier::Member).is_ok());
        assert!(check_create_user(None, Tier::Author).is_err());
        assert!(check_create_user(None, Tier::Root).is_err());
    }

    #[test]
    fn test_root_creates_author() {
        assert!(check_create_user(Some(Tier::Root), Tier::Author).is_ok());
        assert!(check_create_user(Some(Tier::Root), Tier::Member).is_ok());
    }

    #[test]
    fn test_author_cannot_create_root_or_peer() {
        // 0 < 1 means root is *more* privileged; an author may not mint one
        assert!(check_create_user(Some(Tier::Author), Tier::Root).is_err());
        assert!(check_create_user(Some(Tier::Author), Tier::Author).is_err());
        assert!(check_create_user(Some(Tier::Author), Tier::Member).is_ok());
    }

    #[test]
    fn test_member_cannot_create_anyone() {
        assert!(check_create_user(Some(Tier::Member), Tier::Member).is_err());
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    #[test]
    fn test_self_update_without_tier_change() {
        assert!(check_update_user(uid(1), Tier::Member, uid(1), Tier::Member, None).is_ok());
    }

    #[test]
    fn test_self_update_may_only_demote() {
        // Requesting one's own tier (or higher) is denied
        assert!(
            check_update_user(uid(1), Tier::Author, uid(1), Tier::Author, Some(Tier::Author))
                .is_err()
        );
        assert!(
            check_update_user(uid(1), Tier::Author, uid(1), Tier::Author, Some(Tier::Root))
                .is_err()
        );
        // Self-demotion is allowed
        assert!(
            check_update_user(uid(1), Tier::Author, uid(1), Tier::Author, Some(Tier::Member))
                .is_ok()
        );
    }

    #[test]
    fn test_admin_override_on_less_privileged_target() {
        assert!(check_update_user(uid(1), Tier::Root, uid(2), Tier::Member, None).is_ok());
        assert!(
            check_update_user(uid(1), Tier::Root, uid(2), Tier::Member, Some(Tier::Author))
                .is_ok()
        );
    }

    #[test]
    fn test_cannot_update_peer_or_more_privileged() {
        assert!(check_update_user(uid(1), Tier::Author, uid(2), Tier::Author, None).is_err());
        assert!(check_update_user(uid(1), Tier::Author, uid(2), Tier::Root, None).is_err());
        assert!(check_update_user(uid(1), Tier::Member, uid(2), Tier::Member, None).is_err());
    }

    #[test]
    fn test_override_cannot_grant_own_tier() {
        assert!(
            check_update_user(uid(1), Tier::Root, uid(2), Tier::Member, Some(Tier::Root))
                .is_err()
        );
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    #[test]
    fn test_delete_only_less_privileged() {
        assert!(check_delete_user(Tier::Root, Tier::Author).is_ok());
        assert!(check_delete_user(Tier::Root, Tier::Member).is_ok());
        assert!(check_delete_user(Tier::Author, Tier::Member).is_ok());

        assert!(check_delete_user(Tier::Author, Tier::Author).is_err());
        assert!(check_delete_user(Tier::Author, Tier::Root).is_err());
        assert!(check_delete_user(Tier::Member, Tier::Member).is_err());
    }
}
