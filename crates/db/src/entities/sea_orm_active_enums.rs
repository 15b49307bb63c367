//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role stored in the `account_role` enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_role")]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// Platform moderator.
    #[sea_orm(string_value = "admin")]
    Admin,
    /// School requesting supplies.
    #[sea_orm(string_value = "school")]
    School,
    /// Donor offering donations.
    #[sea_orm(string_value = "donor")]
    Donor,
    /// Volunteer helping with logistics.
    #[sea_orm(string_value = "volunteer")]
    Volunteer,
}

/// Moderation status stored in the `approval_status` enum.
///
/// Accounts never hold `completed`; a CHECK constraint backs the engine rule.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// Awaiting admin review.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved and publicly visible.
    #[sea_orm(string_value = "verified")]
    Verified,
    /// Rejected with a stored reason.
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Fulfilled by the owning account.
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// Category of a donation offer.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "donation_type")]
#[serde(rename_all = "kebab-case")]
pub enum DonationType {
    /// Books and reading material.
    #[sea_orm(string_value = "books")]
    Books,
    /// School uniforms.
    #[sea_orm(string_value = "uniforms")]
    Uniforms,
    /// Laptops, tablets and similar devices.
    #[sea_orm(string_value = "digital-devices")]
    DigitalDevices,
    /// Stationery and consumables.
    #[sea_orm(string_value = "stationery")]
    Stationery,
    /// Desks, chairs and other furniture.
    #[sea_orm(string_value = "furniture")]
    Furniture,
    /// Monetary donations.
    #[sea_orm(string_value = "funds")]
    Funds,
    /// Anything not covered above.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Category of a supply request. Schools cannot request funds directly.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_category")]
#[serde(rename_all = "kebab-case")]
pub enum RequestCategory {
    /// Books and reading material.
    #[sea_orm(string_value = "books")]
    Books,
    /// School uniforms.
    #[sea_orm(string_value = "uniforms")]
    Uniforms,
    /// Laptops, tablets and similar devices.
    #[sea_orm(string_value = "digital-devices")]
    DigitalDevices,
    /// Stationery and consumables.
    #[sea_orm(string_value = "stationery")]
    Stationery,
    /// Desks, chairs and other furniture.
    #[sea_orm(string_value = "furniture")]
    Furniture,
    /// Anything not covered above.
    #[sea_orm(string_value = "other")]
    Other,
}

/// How urgently a supply request needs fulfilment.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "request_urgency")]
#[serde(rename_all = "lowercase")]
pub enum RequestUrgency {
    /// Can wait for the next term.
    #[sea_orm(string_value = "low")]
    Low,
    /// Needed this term.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// Blocking day-to-day teaching.
    #[sea_orm(string_value = "high")]
    High,
}
