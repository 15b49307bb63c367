//! Role and ownership checks around lifecycle operations.
//!
//! The state machine decides which status changes are legal; this module
//! decides who may ask for them. Admin decisions, owner-only completion,
//! verified-only submission and the visibility rule for single-entity
//! reads all live here.

use uuid::Uuid;

use crate::lifecycle::error::LifecycleError;
use crate::lifecycle::types::{AccountRole, ApprovalStatus, EntityKind};

/// The authenticated account attempting a read, if any.
#[derive(Debug, Clone, Copy)]
pub struct Viewer {
    /// Account ID.
    pub id: Uuid,
    /// Account role.
    pub role: AccountRole,
}

/// Stateless access checks for lifecycle operations.
pub struct AccessGuard;

impl AccessGuard {
    /// Require the caller to be an admin.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::AdminRequired` for any other role.
    pub fn require_admin(role: AccountRole) -> Result<(), LifecycleError> {
        if role.is_admin() {
            Ok(())
        } else {
            Err(LifecycleError::AdminRequired)
        }
    }

    /// Require the caller to own the entity.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::NotOwner` when the caller is not the owner.
    pub fn require_owner(
        kind: EntityKind,
        caller_id: Uuid,
        owner_id: Uuid,
    ) -> Result<(), LifecycleError> {
        if caller_id == owner_id {
            Ok(())
        } else {
            Err(LifecycleError::NotOwner { kind })
        }
    }

    /// Check that an account may submit a new entity of the given kind.
    ///
    /// Donations come from donors, supply requests from schools, and the
    /// submitting account must itself be verified.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::RoleNotAllowed` when the role does not
    /// match the kind's owner role, and `LifecycleError::AccountNotVerified`
    /// when the account has not been approved yet.
    pub fn check_submission(
        kind: EntityKind,
        role: AccountRole,
        account_status: ApprovalStatus,
    ) -> Result<(), LifecycleError> {
        match kind.owner_role() {
            Some(required) if role == required => {}
            _ => return Err(LifecycleError::RoleNotAllowed { kind, role }),
        }

        if account_status != ApprovalStatus::Verified {
            return Err(LifecycleError::AccountNotVerified);
        }

        Ok(())
    }

    /// Check whether a viewer may read a single entity.
    ///
    /// Verified entities are public. Anything else is visible only to the
    /// owning account and admins.
    #[must_use]
    pub fn can_view(status: ApprovalStatus, owner_id: Uuid, viewer: Option<&Viewer>) -> bool {
        if status.is_public() {
            return true;
        }

        viewer.is_some_and(|v| v.role.is_admin() || v.id == owner_id)
    }
}
