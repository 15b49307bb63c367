//! Lifecycle error types.
//!
//! Every failure of a status transition or access check maps onto an HTTP
//! status and a stable error code; repositories surface not-found and
//! database failures through the same enum so handlers translate exactly
//! one error type.

use thiserror::Error;

use crate::lifecycle::types::{AccountRole, ApprovalStatus, EntityKind};

/// Errors that can occur during lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Attempted an invalid status transition.
    #[error("invalid {kind} transition from {from} to {to}")]
    InvalidTransition {
        /// The entity kind being transitioned.
        kind: EntityKind,
        /// The current status.
        from: ApprovalStatus,
        /// The attempted target status.
        to: ApprovalStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("rejection reason is required")]
    RejectionReasonRequired,

    /// The kind has no resubmission path; a new record must be created.
    #[error("a rejected {kind} cannot be resubmitted")]
    ResubmissionNotSupported {
        /// The entity kind.
        kind: EntityKind,
    },

    /// Profile data was submitted for the wrong account role.
    #[error("account is not registered as a {expected}")]
    RoleMismatch {
        /// The role the profile data belongs to.
        expected: AccountRole,
    },

    /// The caller is not an admin.
    #[error("admin access required")]
    AdminRequired,

    /// The caller does not own the entity.
    #[error("only the owning account can modify this {kind}")]
    NotOwner {
        /// The entity kind.
        kind: EntityKind,
    },

    /// The caller's role cannot submit this kind of entity.
    #[error("role {role} cannot submit a {kind}")]
    RoleNotAllowed {
        /// The entity kind.
        kind: EntityKind,
        /// The caller's role.
        role: AccountRole,
    },

    /// The caller's account has not been verified yet.
    #[error("account must be verified before submitting")]
    AccountNotVerified,

    /// The caller may not view this entity.
    #[error("not authorized to view this {kind}")]
    ViewDenied {
        /// The entity kind.
        kind: EntityKind,
    },

    /// Entity not found.
    #[error("{kind} not found")]
    NotFound {
        /// The entity kind.
        kind: EntityKind,
    },

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

impl LifecycleError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::RejectionReasonRequired
            | Self::ResubmissionNotSupported { .. }
            | Self::RoleMismatch { .. } => 400,

            Self::AdminRequired
            | Self::NotOwner { .. }
            | Self::RoleNotAllowed { .. }
            | Self::AccountNotVerified
            | Self::ViewDenied { .. } => 403,

            Self::NotFound { .. } => 404,

            Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::ResubmissionNotSupported { .. } => "RESUBMISSION_NOT_SUPPORTED",
            Self::RoleMismatch { .. } => "ROLE_MISMATCH",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotOwner { .. } => "NOT_OWNER",
            Self::RoleNotAllowed { .. } => "ROLE_NOT_ALLOWED",
            Self::AccountNotVerified => "ACCOUNT_NOT_VERIFIED",
            Self::ViewDenied { .. } => "VIEW_DENIED",
            Self::NotFound { kind } => match kind {
                EntityKind::Account => "ACCOUNT_NOT_FOUND",
                EntityKind::Donation => "DONATION_NOT_FOUND",
                EntityKind::SupplyRequest => "REQUEST_NOT_FOUND",
            },
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = LifecycleError::InvalidTransition {
            kind: EntityKind::Donation,
            from: ApprovalStatus::Pending,
            to: ApprovalStatus::Completed,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("pending"));
        assert!(err.to_string().contains("completed"));
    }

    #[test]
    fn test_rejection_reason_required_error() {
        let err = LifecycleError::RejectionReasonRequired;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "REJECTION_REASON_REQUIRED");
    }

    #[test]
    fn test_resubmission_not_supported_error() {
        let err = LifecycleError::ResubmissionNotSupported {
            kind: EntityKind::SupplyRequest,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "RESUBMISSION_NOT_SUPPORTED");
        assert!(err.to_string().contains("supply request"));
    }

    #[test]
    fn test_role_mismatch_error() {
        let err = LifecycleError::RoleMismatch {
            expected: AccountRole::School,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "ROLE_MISMATCH");
        assert!(err.to_string().contains("school"));
    }

    #[test]
    fn test_admin_required_error() {
        let err = LifecycleError::AdminRequired;
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "ADMIN_REQUIRED");
    }

    #[test]
    fn test_not_owner_error() {
        let err = LifecycleError::NotOwner {
            kind: EntityKind::Donation,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "NOT_OWNER");
    }

    #[test]
    fn test_role_not_allowed_error() {
        let err = LifecycleError::RoleNotAllowed {
            kind: EntityKind::Donation,
            role: AccountRole::School,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "ROLE_NOT_ALLOWED");
    }

    #[test]
    fn test_account_not_verified_error() {
        let err = LifecycleError::AccountNotVerified;
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "ACCOUNT_NOT_VERIFIED");
    }

    #[test]
    fn test_view_denied_error() {
        let err = LifecycleError::ViewDenied {
            kind: EntityKind::Donation,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "VIEW_DENIED");
    }

    #[test]
    fn test_not_found_codes_per_kind() {
        assert_eq!(
            LifecycleError::NotFound {
                kind: EntityKind::Account
            }
            .error_code(),
            "ACCOUNT_NOT_FOUND"
        );
        assert_eq!(
            LifecycleError::NotFound {
                kind: EntityKind::Donation
            }
            .error_code(),
            "DONATION_NOT_FOUND"
        );
        assert_eq!(
            LifecycleError::NotFound {
                kind: EntityKind::SupplyRequest
            }
            .error_code(),
            "REQUEST_NOT_FOUND"
        );
        assert_eq!(
            LifecycleError::NotFound {
                kind: EntityKind::Donation
            }
            .status_code(),
            404
        );
    }

    #[test]
    fn test_database_error() {
        let err = LifecycleError::Database("connection closed".to_string());
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
