//! Property-based tests for lifecycle access checks.

use proptest::prelude::*;
use uuid::Uuid;

use crate::lifecycle::guard::{AccessGuard, Viewer};
use crate::lifecycle::types::{AccountRole, ApprovalStatus, EntityKind};

/// Strategy for generating random ApprovalStatus values.
fn arb_status() -> impl Strategy<Value = ApprovalStatus> {
    prop_oneof![
        Just(ApprovalStatus::Pending),
        Just(ApprovalStatus::Verified),
        Just(ApprovalStatus::Rejected),
        Just(ApprovalStatus::Completed),
    ]
}

/// Strategy for generating random AccountRole values.
fn arb_role() -> impl Strategy<Value = AccountRole> {
    prop_oneof![
        Just(AccountRole::Admin),
        Just(AccountRole::School),
        Just(AccountRole::Donor),
        Just(AccountRole::Volunteer),
    ]
}

/// Strategy for generating submission kinds (the two owned entity kinds).
fn arb_submission_kind() -> impl Strategy<Value = EntityKind> {
    prop_oneof![Just(EntityKind::Donation), Just(EntityKind::SupplyRequest)]
}

/// Strategy for generating random UUIDs.
fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Visibility: verified is public, everything else is owner/admin only.
    // =========================================================================

    #[test]
    fn prop_verified_is_visible_to_everyone(
        owner in arb_uuid(),
        viewer_id in arb_uuid(),
        role in arb_role(),
    ) {
        prop_assert!(AccessGuard::can_view(ApprovalStatus::Verified, owner, None));

        let viewer = Viewer { id: viewer_id, role };
        prop_assert!(AccessGuard::can_view(ApprovalStatus::Verified, owner, Some(&viewer)));
    }

    #[test]
    fn prop_owner_always_sees_own_entity(
        owner in arb_uuid(),
        status in arb_status(),
        role in arb_role(),
    ) {
        let viewer = Viewer { id: owner, role };
        prop_assert!(AccessGuard::can_view(status, owner, Some(&viewer)));
    }

    #[test]
    fn prop_admin_always_sees_everything(
        owner in arb_uuid(),
        viewer_id in arb_uuid(),
        status in arb_status(),
    ) {
        let admin = Viewer { id: viewer_id, role: AccountRole::Admin };
        prop_assert!(AccessGuard::can_view(status, owner, Some(&admin)));
    }

    #[test]
    fn prop_non_verified_hidden_from_strangers(
        owner in arb_uuid(),
        viewer_id in arb_uuid(),
        status in arb_status(),
        role in arb_role(),
    ) {
        prop_assume!(status != ApprovalStatus::Verified);
        prop_assume!(viewer_id != owner);
        prop_assume!(role != AccountRole::Admin);

        prop_assert!(!AccessGuard::can_view(status, owner, None));

        let stranger = Viewer { id: viewer_id, role };
        prop_assert!(!AccessGuard::can_view(status, owner, Some(&stranger)));
    }

    // =========================================================================
    // Submission: role must match the kind, and the account must be verified.
    // =========================================================================

    #[test]
    fn prop_submission_requires_matching_verified_account(
        kind in arb_submission_kind(),
        role in arb_role(),
        status in arb_status(),
    ) {
        let result = AccessGuard::check_submission(kind, role, status);

        let role_matches = kind.owner_role() == Some(role);
        let verified = status == ApprovalStatus::Verified;

        prop_assert_eq!(result.is_ok(), role_matches && verified);
    }

    // =========================================================================
    // Admin and ownership checks.
    // =========================================================================

    #[test]
    fn prop_require_admin_only_passes_admin(role in arb_role()) {
        let result = AccessGuard::require_admin(role);
        prop_assert_eq!(result.is_ok(), role == AccountRole::Admin);
    }

    #[test]
    fn prop_require_owner_only_passes_same_id(
        caller in arb_uuid(),
        owner in arb_uuid(),
    ) {
        let result = AccessGuard::require_owner(EntityKind::Donation, caller, owner);
        prop_assert_eq!(result.is_ok(), caller == owner);
    }
}
