//! Role and ownership checks.
//!
//! - No IO
//! - No panics
//! - Only explicit inputs (pure policy checks)

use crate::{ClaimSet, DenyReason, Role};

/// Require the caller's role to be one of `required`.
pub fn authorize_roles(claims: &ClaimSet, required: &[Role]) -> Result<(), DenyReason> {
    if required.contains(&claims.role()) {
        Ok(())
    } else {
        Err(DenyReason::InsufficientRole)
    }
}

/// Require a customer to own the order they act on.
///
/// Admins and dealers are not subject to ownership; their access is settled by
/// the operation's role set.
pub fn check_ownership(claims: &ClaimSet, owner_email: &str) -> Result<(), DenyReason> {
    match claims.role() {
        Role::Admin | Role::Dealer => Ok(()),
        Role::Customer if claims.email() == owner_email => Ok(()),
        Role::Customer => Err(DenyReason::NotOwner),
    }
}

/// The owner an order must still have when a mutation is applied.
///
/// `None` means any owner; the store re-runs this check atomically with the
/// write, mirroring [`check_ownership`].
pub fn ownership_scope(claims: &ClaimSet) -> Option<&str> {
    match claims.role() {
        Role::Admin | Role::Dealer => None,
        Role::Customer => Some(claims.email()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn role_in_set_is_allowed() {
        let claims = ClaimSet::for_test("d@x.com", Role::Dealer);
        assert_eq!(authorize_roles(&claims, &[Role::Admin, Role::Dealer]), Ok(()));
    }

    #[test]
    fn role_outside_set_is_denied() {
        let claims = ClaimSet::for_test("c@x.com", Role::Customer);
        assert_eq!(
            authorize_roles(&claims, &[Role::Admin, Role::Dealer]),
            Err(DenyReason::InsufficientRole)
        );
        assert_eq!(authorize_roles(&claims, &[]), Err(DenyReason::InsufficientRole));
    }

    #[test]
    fn customer_must_own_order() {
        let claims = ClaimSet::for_test("a@x.com", Role::Customer);
        assert_eq!(check_ownership(&claims, "a@x.com"), Ok(()));
        assert_eq!(check_ownership(&claims, "b@x.com"), Err(DenyReason::NotOwner));
        // Comparison is exact.
        assert_eq!(check_ownership(&claims, "A@x.com"), Err(DenyReason::NotOwner));
    }

    #[test]
    fn staff_skip_ownership() {
        for role in [Role::Admin, Role::Dealer] {
            let claims = ClaimSet::for_test("staff@x.com", role);
            assert_eq!(check_ownership(&claims, "someone@else.com"), Ok(()));
        }
    }

    #[test]
    fn ownership_scope_follows_role() {
        let customer = ClaimSet::for_test("a@x.com", Role::Customer);
        assert_eq!(ownership_scope(&customer), Some("a@x.com"));
        for role in [Role::Admin, Role::Dealer] {
            assert_eq!(ownership_scope(&ClaimSet::for_test("s@x.com", role)), None);
        }
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: admins pass ownership for any owner.
        #[test]
        fn admin_ignores_ownership(
            email in "[a-z]{1,8}@[a-z]{1,8}\\.com",
            owner in "[a-z]{1,8}@[a-z]{1,8}\\.com",
        ) {
            let claims = ClaimSet::for_test(&email, Role::Admin);
            prop_assert_eq!(check_ownership(&claims, &owner), Ok(()));
        }

        /// Property: a customer acting on someone else's order is always NotOwner.
        #[test]
        fn customer_non_owner_is_denied(
            email in "[a-z]{1,8}@[a-z]{1,8}\\.com",
            owner in "[a-z]{1,8}@[a-z]{1,8}\\.com",
        ) {
            prop_assume!(email != owner);
            let claims = ClaimSet::for_test(&email, Role::Customer);
            prop_assert_eq!(check_ownership(&claims, &owner), Err(DenyReason::NotOwner));
        }

        /// Property: the role check is plain set membership.
        #[test]
        fn role_check_is_membership(
            role in any_role(),
            required in prop::collection::vec(any_role(), 0..4),
        ) {
            let claims = ClaimSet::for_test("x@x.com", role);
            let expected = if required.contains(&role) {
                Ok(())
            } else {
                Err(DenyReason::InsufficientRole)
            };
            prop_assert_eq!(authorize_roles(&claims, &required), expected);
        }
    }
}
