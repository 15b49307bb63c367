//! Lifecycle domain types shared by accounts, donations and supply requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of an account, donation or supply request.
///
/// Every entity is created as `Pending`. An admin moves it to `Verified`
/// or `Rejected`; the owner of a verified donation or supply request can
/// mark it `Completed`. Accounts never reach `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting admin review.
    Pending,
    /// Approved by an admin and publicly visible.
    Verified,
    /// Rejected by an admin; `rejection_reason` records why.
    Rejected,
    /// Fulfilled by its owner (donations and supply requests only).
    Completed,
}

impl ApprovalStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "rejected" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }

    /// Returns true if entities in this status are publicly visible.
    #[must_use]
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role attached to an account.
///
/// Roles are flat: an admin moderates, the other three submit and own
/// their respective entities. The role is fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Platform moderator; approves, rejects and deletes.
    Admin,
    /// A school that posts supply requests.
    School,
    /// A donor that offers donations.
    Donor,
    /// A volunteer offering transport or skills.
    Volunteer,
}

impl AccountRole {
    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "school" => Some(Self::School),
            "donor" => Some(Self::Donor),
            "volunteer" => Some(Self::Volunteer),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::School => "school",
            Self::Donor => "donor",
            Self::Volunteer => "volunteer",
        }
    }

    /// Returns true if this role moderates the platform.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if accounts with this role can self-register.
    ///
    /// Admin accounts are seeded, never created through registration.
    #[must_use]
    pub fn self_registrable(&self) -> bool {
        !self.is_admin()
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The three entity kinds that share the approval lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A registered school, donor or volunteer account.
    Account,
    /// A donation offer submitted by a donor.
    Donation,
    /// A supply request submitted by a school.
    SupplyRequest,
}

impl EntityKind {
    /// Returns the identifier used in storage keys and error codes.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Donation => "donation",
            Self::SupplyRequest => "supply_request",
        }
    }

    /// Returns the role allowed to submit this kind of entity.
    ///
    /// Accounts are not submitted by anyone, so `Account` returns `None`.
    #[must_use]
    pub fn owner_role(&self) -> Option<AccountRole> {
        match self {
            Self::Account => None,
            Self::Donation => Some(AccountRole::Donor),
            Self::SupplyRequest => Some(AccountRole::School),
        }
    }

    /// Returns true if this kind can hold the given status.
    ///
    /// Accounts never become `Completed`; everything else is shared.
    #[must_use]
    pub fn allows(&self, status: ApprovalStatus) -> bool {
        match self {
            Self::Account => status != ApprovalStatus::Completed,
            Self::Donation | Self::SupplyRequest => true,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::Donation => write!(f, "donation"),
            Self::SupplyRequest => write!(f, "supply request"),
        }
    }
}

/// A validated status change ready to be applied to a row.
///
/// The rejection reason is carried alongside the target status so the two
/// are always written together: `Some` exactly when the target status is
/// `Rejected`, `None` otherwise (which clears any stored reason).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The status to write.
    pub to: ApprovalStatus,
    /// The rejection reason to write.
    pub rejection_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str() {
        assert_eq!(ApprovalStatus::Pending.as_str(), "pending");
        assert_eq!(ApprovalStatus::Verified.as_str(), "verified");
        assert_eq!(ApprovalStatus::Rejected.as_str(), "rejected");
        assert_eq!(ApprovalStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            ApprovalStatus::parse("pending"),
            Some(ApprovalStatus::Pending)
        );
        assert_eq!(
            ApprovalStatus::parse("VERIFIED"),
            Some(ApprovalStatus::Verified)
        );
        assert_eq!(
            ApprovalStatus::parse("Rejected"),
            Some(ApprovalStatus::Rejected)
        );
        assert_eq!(
            ApprovalStatus::parse("completed"),
            Some(ApprovalStatus::Completed)
        );
        assert_eq!(ApprovalStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_visibility() {
        assert!(ApprovalStatus::Verified.is_public());
        assert!(!ApprovalStatus::Pending.is_public());
        assert!(!ApprovalStatus::Rejected.is_public());
        assert!(!ApprovalStatus::Completed.is_public());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(AccountRole::parse("admin"), Some(AccountRole::Admin));
        assert_eq!(AccountRole::parse("SCHOOL"), Some(AccountRole::School));
        assert_eq!(AccountRole::parse("Donor"), Some(AccountRole::Donor));
        assert_eq!(
            AccountRole::parse("volunteer"),
            Some(AccountRole::Volunteer)
        );
        assert_eq!(AccountRole::parse("teacher"), None);
    }

    #[test]
    fn test_role_self_registrable() {
        assert!(!AccountRole::Admin.self_registrable());
        assert!(AccountRole::School.self_registrable());
        assert!(AccountRole::Donor.self_registrable());
        assert!(AccountRole::Volunteer.self_registrable());
    }

    #[test]
    fn test_kind_owner_role() {
        assert_eq!(EntityKind::Account.owner_role(), None);
        assert_eq!(EntityKind::Donation.owner_role(), Some(AccountRole::Donor));
        assert_eq!(
            EntityKind::SupplyRequest.owner_role(),
            Some(AccountRole::School)
        );
    }

    #[test]
    fn test_kind_allows_completed() {
        assert!(!EntityKind::Account.allows(ApprovalStatus::Completed));
        assert!(EntityKind::Donation.allows(ApprovalStatus::Completed));
        assert!(EntityKind::SupplyRequest.allows(ApprovalStatus::Completed));

        for kind in [
            EntityKind::Account,
            EntityKind::Donation,
            EntityKind::SupplyRequest,
        ] {
            assert!(kind.allows(ApprovalStatus::Pending));
            assert!(kind.allows(ApprovalStatus::Verified));
            assert!(kind.allows(ApprovalStatus::Rejected));
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(format!("{}", EntityKind::Account), "account");
        assert_eq!(format!("{}", EntityKind::SupplyRequest), "supply request");
    }
}
