//! Property-based tests for the lifecycle state machine.
//!
//! These tests exercise the transition rules across randomized statuses,
//! entity kinds and rejection reasons.

use proptest::prelude::*;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::service::Lifecycle;
use crate::lifecycle::types::{ApprovalStatus, EntityKind};

/// Strategy for generating random ApprovalStatus values.
fn arb_status() -> impl Strategy<Value = ApprovalStatus> {
    prop_oneof![
        Just(ApprovalStatus::Pending),
        Just(ApprovalStatus::Verified),
        Just(ApprovalStatus::Rejected),
        Just(ApprovalStatus::Completed),
    ]
}

/// Strategy for generating random EntityKind values.
fn arb_kind() -> impl Strategy<Value = EntityKind> {
    prop_oneof![
        Just(EntityKind::Account),
        Just(EntityKind::Donation),
        Just(EntityKind::SupplyRequest),
    ]
}

/// Strategy for generating non-blank rejection reasons.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,80}".prop_map(|s| s.trim_end().to_string())
}

/// Strategy for generating whitespace-only strings.
fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t]{0,10}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Approve is an absolute write: verified from anywhere, reason cleared.
    // =========================================================================

    #[test]
    fn prop_approve_always_yields_verified(kind in arb_kind()) {
        let transition = Lifecycle::for_kind(kind).approve();
        prop_assert_eq!(transition.to, ApprovalStatus::Verified);
        prop_assert_eq!(transition.rejection_reason, None);
    }

    // =========================================================================
    // Reject stores the reason; a blank reason is refused for every kind.
    // =========================================================================

    #[test]
    fn prop_reject_keeps_reason(kind in arb_kind(), reason in arb_reason()) {
        prop_assume!(!reason.trim().is_empty());

        let transition = Lifecycle::for_kind(kind).reject(reason.clone()).unwrap();
        prop_assert_eq!(transition.to, ApprovalStatus::Rejected);
        prop_assert_eq!(transition.rejection_reason, Some(reason));
    }

    #[test]
    fn prop_reject_blank_reason_fails(kind in arb_kind(), reason in arb_blank()) {
        let result = Lifecycle::for_kind(kind).reject(reason);
        prop_assert!(matches!(result, Err(LifecycleError::RejectionReasonRequired)));
    }

    // =========================================================================
    // Completion is owner-kind specific and only leaves `verified`.
    // =========================================================================

    #[test]
    fn prop_complete_only_from_verified(kind in arb_kind(), current in arb_status()) {
        let result = Lifecycle::for_kind(kind).complete(current);

        let should_succeed =
            kind != EntityKind::Account && current == ApprovalStatus::Verified;

        if should_succeed {
            let transition = result.unwrap();
            prop_assert_eq!(transition.to, ApprovalStatus::Completed);
            prop_assert_eq!(transition.rejection_reason, None);
        } else {
            prop_assert!(matches!(result, Err(LifecycleError::InvalidTransition { .. })));
        }
    }

    // =========================================================================
    // Resubmission: accounts reset from rejected, everything else refuses.
    // =========================================================================

    #[test]
    fn prop_resubmit_resets_only_rejected_accounts(kind in arb_kind(), current in arb_status()) {
        let result = Lifecycle::for_kind(kind).resubmit(current);

        if kind != EntityKind::Account {
            prop_assert!(matches!(
                result,
                Err(LifecycleError::ResubmissionNotSupported { .. })
            ));
        } else if current == ApprovalStatus::Rejected {
            let transition = result.unwrap().unwrap();
            prop_assert_eq!(transition.to, ApprovalStatus::Pending);
            prop_assert_eq!(transition.rejection_reason, None);
        } else {
            prop_assert_eq!(result.unwrap(), None);
        }
    }

    // =========================================================================
    // The reason travels with the status: present exactly when rejected.
    // =========================================================================

    #[test]
    fn prop_reason_present_iff_rejected(
        kind in arb_kind(),
        current in arb_status(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.trim().is_empty());
        let lifecycle = Lifecycle::for_kind(kind);

        let mut transitions = vec![lifecycle.approve()];
        transitions.push(lifecycle.reject(reason).unwrap());
        if let Ok(t) = lifecycle.complete(current) {
            transitions.push(t);
        }
        if let Ok(Some(t)) = lifecycle.resubmit(current) {
            transitions.push(t);
        }

        for transition in transitions {
            prop_assert_eq!(
                transition.rejection_reason.is_some(),
                transition.to == ApprovalStatus::Rejected
            );
        }
    }

    // =========================================================================
    // Every transition an operation produces is also valid per the graph.
    // =========================================================================

    #[test]
    fn prop_operations_agree_with_transition_graph(
        kind in arb_kind(),
        current in arb_status(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.trim().is_empty());
        let lifecycle = Lifecycle::for_kind(kind);

        let approve = lifecycle.approve();
        prop_assert!(lifecycle.is_valid_transition(current, approve.to));

        let reject = lifecycle.reject(reason).unwrap();
        prop_assert!(lifecycle.is_valid_transition(current, reject.to));

        if let Ok(complete) = lifecycle.complete(current) {
            prop_assert!(lifecycle.is_valid_transition(current, complete.to));
        }

        if let Ok(Some(resubmit)) = lifecycle.resubmit(current) {
            prop_assert!(lifecycle.is_valid_transition(current, resubmit.to));
        }
    }

    // =========================================================================
    // Statuses an entity kind cannot hold are never produced for it.
    // =========================================================================

    #[test]
    fn prop_account_never_completes(current in arb_status()) {
        let lifecycle = Lifecycle::for_kind(EntityKind::Account);
        prop_assert!(lifecycle.complete(current).is_err());
        prop_assert!(!lifecycle.is_valid_transition(current, ApprovalStatus::Completed));
    }
}
