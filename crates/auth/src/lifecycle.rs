//! State-dependent restriction on deleting an order.
//!
//! Deletion is the only gated transition: forward progression through the
//! lifecycle is settled by the status-change role set alone.

use orderdesk_orders::OrderState;

use crate::{DenyReason, Role};

const CUSTOMER_DELETABLE: &[OrderState] = &[OrderState::Pending, OrderState::InPreparation];

/// States from which `role` may delete an order. `None` means any state.
///
/// The store re-runs the same allow-set atomically at the point of deletion.
pub fn deletable_states(role: Role) -> Option<&'static [OrderState]> {
    match role {
        Role::Admin | Role::Dealer => None,
        Role::Customer => Some(CUSTOMER_DELETABLE),
    }
}

pub fn check_deletion(role: Role, state: OrderState) -> Result<(), DenyReason> {
    match deletable_states(role) {
        None => Ok(()),
        Some(allowed) if allowed.contains(&state) => Ok(()),
        Some(_) => Err(DenyReason::InvalidStateForDeletion),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn customer_may_delete_early_orders() {
        assert_eq!(check_deletion(Role::Customer, OrderState::Pending), Ok(()));
        assert_eq!(check_deletion(Role::Customer, OrderState::InPreparation), Ok(()));
    }

    #[test]
    fn customer_may_not_delete_once_ready() {
        for state in [OrderState::Ready, OrderState::OutForDelivery, OrderState::Delivered] {
            assert_eq!(
                check_deletion(Role::Customer, state),
                Err(DenyReason::InvalidStateForDeletion)
            );
        }
    }

    #[test]
    fn staff_may_delete_in_any_state() {
        for role in [Role::Admin, Role::Dealer] {
            assert_eq!(deletable_states(role), None);
            for state in OrderState::ALL {
                assert_eq!(check_deletion(role, state), Ok(()));
            }
        }
    }

    proptest! {
        /// Property: the guard agrees with the published allow-set.
        #[test]
        fn guard_matches_allow_set(
            role in prop::sample::select(Role::ALL.to_vec()),
            state in prop::sample::select(OrderState::ALL.to_vec()),
        ) {
            let allowed = deletable_states(role).is_none_or(|states| states.contains(&state));
            prop_assert_eq!(check_deletion(role, state).is_ok(), allowed);
        }
    }
}
