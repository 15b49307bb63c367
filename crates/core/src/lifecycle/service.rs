//! Lifecycle state transitions.
//!
//! One state machine serves accounts, donations and supply requests.
//! Methods validate a transition for a given entity kind and return a
//! [`Transition`] value that the repository applies in a single
//! read-modify-write. Admin decisions (approve, reject) are absolute
//! writes: they are valid from any current status so an admin can always
//! correct an earlier decision.

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::{ApprovalStatus, EntityKind, Transition};

/// Stateless lifecycle engine for one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lifecycle {
    kind: EntityKind,
}

impl Lifecycle {
    /// Creates the lifecycle engine for an entity kind.
    #[must_use]
    pub const fn for_kind(kind: EntityKind) -> Self {
        Self { kind }
    }

    /// Returns the entity kind this engine validates for.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Approve the entity.
    ///
    /// Valid from any current status. The resulting transition sets
    /// `verified` and clears any stored rejection reason.
    #[must_use]
    pub fn approve(&self) -> Transition {
        Transition {
            to: ApprovalStatus::Verified,
            rejection_reason: None,
        }
    }

    /// Reject the entity with a reason.
    ///
    /// Valid from any current status. The reason is mandatory for all
    /// three kinds and is stored alongside the `rejected` status.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::RejectionReasonRequired` if the reason is
    /// empty or whitespace.
    pub fn reject(&self, reason: String) -> Result<Transition, LifecycleError> {
        if reason.trim().is_empty() {
            return Err(LifecycleError::RejectionReasonRequired);
        }

        Ok(Transition {
            to: ApprovalStatus::Rejected,
            rejection_reason: Some(reason),
        })
    }

    /// Mark the entity as completed.
    ///
    /// Only donations and supply requests support completion, and only
    /// from `verified`. Completion is terminal.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::InvalidTransition` when the kind does not
    /// support completion or the entity is not currently verified.
    pub fn complete(&self, current: ApprovalStatus) -> Result<Transition, LifecycleError> {
        if !self.kind.allows(ApprovalStatus::Completed) || current != ApprovalStatus::Verified {
            return Err(LifecycleError::InvalidTransition {
                kind: self.kind,
                from: current,
                to: ApprovalStatus::Completed,
            });
        }

        Ok(Transition {
            to: ApprovalStatus::Completed,
            rejection_reason: None,
        })
    }

    /// Resolve the status change caused by a profile resubmission.
    ///
    /// Accounts are the only kind with a resubmission path: completing a
    /// profile while `rejected` resets the account to `pending` and clears
    /// the rejection reason, putting it back in the admin's queue. In any
    /// other status the profile data merges without a status change and
    /// `None` is returned.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::ResubmissionNotSupported` for donations
    /// and supply requests; their rejections are terminal.
    pub fn resubmit(&self, current: ApprovalStatus) -> Result<Option<Transition>, LifecycleError> {
        if self.kind != EntityKind::Account {
            return Err(LifecycleError::ResubmissionNotSupported { kind: self.kind });
        }

        if current == ApprovalStatus::Rejected {
            return Ok(Some(Transition {
                to: ApprovalStatus::Pending,
                rejection_reason: None,
            }));
        }

        Ok(None)
    }

    /// Check if a status transition is valid for this kind.
    ///
    /// Admin decisions make `verified` and `rejected` reachable from any
    /// status. `completed` is reachable only from `verified` where the
    /// kind supports it, and `pending` is re-entered only by an account
    /// resubmitting after rejection.
    #[must_use]
    pub fn is_valid_transition(&self, from: ApprovalStatus, to: ApprovalStatus) -> bool {
        match to {
            ApprovalStatus::Verified | ApprovalStatus::Rejected => true,
            ApprovalStatus::Completed => {
                self.kind.allows(ApprovalStatus::Completed) && from == ApprovalStatus::Verified
            }
            ApprovalStatus::Pending => {
                self.kind == EntityKind::Account && from == ApprovalStatus::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [ApprovalStatus; 4] = [
        ApprovalStatus::Pending,
        ApprovalStatus::Verified,
        ApprovalStatus::Rejected,
        ApprovalStatus::Completed,
    ];

    #[test]
    fn test_approve_sets_verified_and_clears_reason() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Donation);
        let transition = lifecycle.approve();
        assert_eq!(transition.to, ApprovalStatus::Verified);
        assert_eq!(transition.rejection_reason, None);
    }

    #[test]
    fn test_approve_valid_for_every_kind() {
        for kind in [
            EntityKind::Account,
            EntityKind::Donation,
            EntityKind::SupplyRequest,
        ] {
            let transition = Lifecycle::for_kind(kind).approve();
            assert_eq!(transition.to, ApprovalStatus::Verified);
        }
    }

    #[test]
    fn test_reject_stores_reason() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Account);
        let transition = lifecycle
            .reject("Registration proof is illegible".to_string())
            .unwrap();
        assert_eq!(transition.to, ApprovalStatus::Rejected);
        assert_eq!(
            transition.rejection_reason.as_deref(),
            Some("Registration proof is illegible")
        );
    }

    #[test]
    fn test_reject_empty_reason_fails() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Donation);
        let result = lifecycle.reject(String::new());
        assert!(matches!(
            result,
            Err(LifecycleError::RejectionReasonRequired)
        ));
    }

    #[test]
    fn test_reject_whitespace_reason_fails() {
        let lifecycle = Lifecycle::for_kind(EntityKind::SupplyRequest);
        let result = lifecycle.reject("   ".to_string());
        assert!(matches!(
            result,
            Err(LifecycleError::RejectionReasonRequired)
        ));
    }

    #[test]
    fn test_complete_from_verified() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Donation);
        let transition = lifecycle.complete(ApprovalStatus::Verified).unwrap();
        assert_eq!(transition.to, ApprovalStatus::Completed);
        assert_eq!(transition.rejection_reason, None);
    }

    #[test]
    fn test_complete_from_non_verified_fails() {
        let lifecycle = Lifecycle::for_kind(EntityKind::SupplyRequest);
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Rejected,
            ApprovalStatus::Completed,
        ] {
            let result = lifecycle.complete(status);
            assert!(matches!(
                result,
                Err(LifecycleError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_complete_twice_fails() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Donation);
        let first = lifecycle.complete(ApprovalStatus::Verified).unwrap();
        assert_eq!(first.to, ApprovalStatus::Completed);

        let second = lifecycle.complete(first.to);
        assert!(matches!(
            second,
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_complete_account_fails() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Account);
        let result = lifecycle.complete(ApprovalStatus::Verified);
        assert!(matches!(
            result,
            Err(LifecycleError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_resubmit_rejected_account_resets_to_pending() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Account);
        let transition = lifecycle.resubmit(ApprovalStatus::Rejected).unwrap();
        assert_eq!(
            transition,
            Some(Transition {
                to: ApprovalStatus::Pending,
                rejection_reason: None,
            })
        );
    }

    #[test]
    fn test_resubmit_non_rejected_account_is_noop() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Account);
        assert_eq!(lifecycle.resubmit(ApprovalStatus::Pending).unwrap(), None);
        assert_eq!(lifecycle.resubmit(ApprovalStatus::Verified).unwrap(), None);
    }

    #[test]
    fn test_resubmit_donation_fails() {
        let lifecycle = Lifecycle::for_kind(EntityKind::Donation);
        let result = lifecycle.resubmit(ApprovalStatus::Rejected);
        assert!(matches!(
            result,
            Err(LifecycleError::ResubmissionNotSupported { .. })
        ));
    }

    #[test]
    fn test_is_valid_transition_admin_targets() {
        for kind in [
            EntityKind::Account,
            EntityKind::Donation,
            EntityKind::SupplyRequest,
        ] {
            let lifecycle = Lifecycle::for_kind(kind);
            for from in ALL_STATUSES {
                assert!(lifecycle.is_valid_transition(from, ApprovalStatus::Verified));
                assert!(lifecycle.is_valid_transition(from, ApprovalStatus::Rejected));
            }
        }
    }

    #[test]
    fn test_is_valid_transition_completed() {
        let donation = Lifecycle::for_kind(EntityKind::Donation);
        assert!(donation.is_valid_transition(ApprovalStatus::Verified, ApprovalStatus::Completed));
        assert!(!donation.is_valid_transition(ApprovalStatus::Pending, ApprovalStatus::Completed));
        assert!(!donation.is_valid_transition(ApprovalStatus::Rejected, ApprovalStatus::Completed));

        let account = Lifecycle::for_kind(EntityKind::Account);
        assert!(!account.is_valid_transition(ApprovalStatus::Verified, ApprovalStatus::Completed));
    }

    #[test]
    fn test_is_valid_transition_pending() {
        let account = Lifecycle::for_kind(EntityKind::Account);
        assert!(account.is_valid_transition(ApprovalStatus::Rejected, ApprovalStatus::Pending));
        assert!(!account.is_valid_transition(ApprovalStatus::Verified, ApprovalStatus::Pending));

        let request = Lifecycle::for_kind(EntityKind::SupplyRequest);
        assert!(!request.is_valid_transition(ApprovalStatus::Rejected, ApprovalStatus::Pending));
    }
}
