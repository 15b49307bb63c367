//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! Every status change is validated by the core lifecycle engine before a
//! row is written, and each transition is a single read-modify-write with
//! last-write-wins semantics.

pub mod account;
pub mod donation;
pub mod supply_request;

pub use account::{
    AccountRepository, DonorProfileInput, RegisterAccountInput, SchoolProfileInput,
    UpdateProfileInput, VolunteerProfileInput,
};
pub use donation::{CreateDonationInput, DonationRepository};
pub use supply_request::{CreateSupplyRequestInput, SupplyRequestRepository};

use edulink_core::lifecycle::{AccountRole, ApprovalStatus};

use crate::entities::sea_orm_active_enums;

/// Converts a database status to the core lifecycle status.
pub(crate) fn status_to_core(status: &sea_orm_active_enums::ApprovalStatus) -> ApprovalStatus {
    match status {
        sea_orm_active_enums::ApprovalStatus::Pending => ApprovalStatus::Pending,
        sea_orm_active_enums::ApprovalStatus::Verified => ApprovalStatus::Verified,
        sea_orm_active_enums::ApprovalStatus::Rejected => ApprovalStatus::Rejected,
        sea_orm_active_enums::ApprovalStatus::Completed => ApprovalStatus::Completed,
    }
}

/// Converts a core lifecycle status to its database representation.
pub(crate) fn status_to_db(status: ApprovalStatus) -> sea_orm_active_enums::ApprovalStatus {
    match status {
        ApprovalStatus::Pending => sea_orm_active_enums::ApprovalStatus::Pending,
        ApprovalStatus::Verified => sea_orm_active_enums::ApprovalStatus::Verified,
        ApprovalStatus::Rejected => sea_orm_active_enums::ApprovalStatus::Rejected,
        ApprovalStatus::Completed => sea_orm_active_enums::ApprovalStatus::Completed,
    }
}

/// Converts a database role to the core lifecycle role.
pub(crate) fn role_to_core(role: &sea_orm_active_enums::AccountRole) -> AccountRole {
    match role {
        sea_orm_active_enums::AccountRole::Admin => AccountRole::Admin,
        sea_orm_active_enums::AccountRole::School => AccountRole::School,
        sea_orm_active_enums::AccountRole::Donor => AccountRole::Donor,
        sea_orm_active_enums::AccountRole::Volunteer => AccountRole::Volunteer,
    }
}

/// Converts a core lifecycle role to its database representation.
pub(crate) fn role_to_db(role: AccountRole) -> sea_orm_active_enums::AccountRole {
    match role {
        AccountRole::Admin => sea_orm_active_enums::AccountRole::Admin,
        AccountRole::School => sea_orm_active_enums::AccountRole::School,
        AccountRole::Donor => sea_orm_active_enums::AccountRole::Donor,
        AccountRole::Volunteer => sea_orm_active_enums::AccountRole::Volunteer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_conversion_round_trips() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::Verified,
            ApprovalStatus::Rejected,
            ApprovalStatus::Completed,
        ] {
            assert_eq!(status_to_core(&status_to_db(status)), status);
        }
    }

    #[test]
    fn test_role_conversion_round_trips() {
        for role in [
            AccountRole::Admin,
            AccountRole::School,
            AccountRole::Donor,
            AccountRole::Volunteer,
        ] {
            assert_eq!(role_to_core(&role_to_db(role)), role);
        }
    }
}
