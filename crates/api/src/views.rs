//! Response projections for API payloads.
//!
//! Rows are never serialized directly. Each view selects the columns a
//! caller is allowed to see, keyed by the account's role where the
//! payload differs per role.

use chrono::{DateTime, FixedOffset};
use edulink_core::lifecycle::ApprovalStatus as LifecycleStatus;
use edulink_db::entities::sea_orm_active_enums::{
    AccountRole, ApprovalStatus, DonationType, RequestCategory, RequestUrgency,
};
use edulink_db::entities::{accounts, donations, supply_requests};
use serde::Serialize;
use uuid::Uuid;

/// Converts a stored status into its lifecycle counterpart for guard checks.
pub(crate) fn core_status(status: &ApprovalStatus) -> LifecycleStatus {
    match status {
        ApprovalStatus::Pending => LifecycleStatus::Pending,
        ApprovalStatus::Verified => LifecycleStatus::Verified,
        ApprovalStatus::Rejected => LifecycleStatus::Rejected,
        ApprovalStatus::Completed => LifecycleStatus::Completed,
    }
}

// ============================================================================
// Account Views
// ============================================================================

/// Compact account payload returned by registration and login.
///
/// The profile columns included depend on the role: schools expose their
/// school name (doubling as the organization name for shared frontend
/// components), donors their organization, volunteers their contact and
/// logistics details. Admin accounts expose only the common columns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role.
    pub role: AccountRole,
    /// Moderation status.
    pub status: ApprovalStatus,
    /// Reason recorded by the rejecting admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// School name (school accounts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    /// Organization name (donor accounts; schools mirror their school name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// Full legal name (volunteer accounts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Vehicle available for transport (volunteer accounts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    /// Availability window (volunteer accounts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Offered skills (volunteer accounts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    /// Contact number (volunteer accounts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Street address (volunteer accounts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl AccountSummary {
    /// Projects an account row into the role-keyed summary payload.
    #[must_use]
    pub fn project(account: &accounts::Model) -> Self {
        let mut view = Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role.clone(),
            status: account.status.clone(),
            rejection_reason: account.rejection_reason.clone(),
            school_name: None,
            organization_name: None,
            full_name: None,
            vehicle_type: None,
            availability: None,
            skills: None,
            contact_number: None,
            address: None,
        };

        match account.role {
            AccountRole::School => {
                view.school_name = account.school_name.clone();
                view.organization_name = account.school_name.clone();
            }
            AccountRole::Donor => {
                view.organization_name = account.organization_name.clone();
            }
            AccountRole::Volunteer => {
                view.full_name = account.full_name.clone();
                view.vehicle_type = account.vehicle_type.clone();
                view.availability = account.availability.clone();
                view.skills = account.skills.clone();
                view.contact_number = account.contact_number.clone();
                view.address = account.address.clone();
            }
            AccountRole::Admin => {}
        }

        view
    }
}

/// Full account payload minus the password hash.
///
/// Returned to the account owner (`/auth/me`) and to admins in the
/// moderation lists. Unset profile columns are omitted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetail {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Account role.
    pub role: AccountRole,
    /// Moderation status.
    pub status: ApprovalStatus,
    /// Reason recorded by the rejecting admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// School name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    /// Government registration number of the school.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_reg_no: Option<String>,
    /// School type (primary, secondary, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_type: Option<String>,
    /// Province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// District.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// School office phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_contact: Option<String>,
    /// School office email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_email: Option<String>,
    /// Principal's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_name: Option<String>,
    /// Principal's phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_contact: Option<String>,
    /// School website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Storage key of the registration proof document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_proof: Option<String>,
    /// Authority that can vouch for the school.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifying_authority: Option<String>,
    /// Contact for the verifying authority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority_contact: Option<String>,
    /// Storage key of the endorsement letter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endorsement_letter: Option<String>,
    /// Donor organization name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// Donor organization registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// Donor organization type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_type: Option<String>,
    /// Contact number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Storage key of the identity certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_certificate: Option<String>,
    /// Representative's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_name: Option<String>,
    /// Representative's position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_position: Option<String>,
    /// Representative's email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_email: Option<String>,
    /// Representative's phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative_phone: Option<String>,
    /// Partner organization that referred the donor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_partner: Option<String>,
    /// Volunteer's full legal name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Storage key of the NIC front scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nic_front: Option<String>,
    /// Storage key of the NIC back scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nic_back: Option<String>,
    /// Vehicle available for transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    /// Availability window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Offered skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    /// Timestamp of the last successful login.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<FixedOffset>>,
    /// Creation timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// Last update timestamp.
    pub updated_at: DateTime<FixedOffset>,
}

impl From<accounts::Model> for AccountDetail {
    fn from(account: accounts::Model) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            role: account.role,
            status: account.status,
            rejection_reason: account.rejection_reason,
            school_name: account.school_name,
            school_reg_no: account.school_reg_no,
            school_type: account.school_type,
            province: account.province,
            district: account.district,
            address: account.address,
            school_contact: account.school_contact,
            school_email: account.school_email,
            principal_name: account.principal_name,
            principal_contact: account.principal_contact,
            website: account.website,
            registration_proof: account.registration_proof,
            verifying_authority: account.verifying_authority,
            authority_contact: account.authority_contact,
            endorsement_letter: account.endorsement_letter,
            organization_name: account.organization_name,
            registration_number: account.registration_number,
            organization_type: account.organization_type,
            contact_number: account.contact_number,
            identity_certificate: account.identity_certificate,
            representative_name: account.representative_name,
            representative_position: account.representative_position,
            representative_email: account.representative_email,
            representative_phone: account.representative_phone,
            reference_partner: account.reference_partner,
            full_name: account.full_name,
            nic_front: account.nic_front,
            nic_back: account.nic_back,
            vehicle_type: account.vehicle_type,
            availability: account.availability,
            skills: account.skills,
            last_login_at: account.last_login_at,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Public directory entry for a verified volunteer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerView {
    /// Account ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Full legal name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Contact number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Vehicle available for transport.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
    /// Availability window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    /// Offered skills.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    /// Registration timestamp.
    pub created_at: DateTime<FixedOffset>,
}

impl From<accounts::Model> for VolunteerView {
    fn from(account: accounts::Model) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            full_name: account.full_name,
            contact_number: account.contact_number,
            address: account.address,
            vehicle_type: account.vehicle_type,
            availability: account.availability,
            skills: account.skills,
            created_at: account.created_at,
        }
    }
}

// ============================================================================
// Donation and Supply Request Views
// ============================================================================

/// Donation payload shared by the public board and the admin lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationView {
    /// Donation ID.
    pub id: Uuid,
    /// Owning donor account ID.
    pub donor_id: Uuid,
    /// Donating organization.
    pub organization_name: String,
    /// Contact person.
    pub contact_person: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Donation category.
    pub donation_type: DonationType,
    /// Intended purpose.
    pub purpose: String,
    /// Free-form description.
    pub description: String,
    /// Estimated value or quantity.
    pub estimated_amount: String,
    /// Storage key of an illustrative image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Moderation status.
    pub status: ApprovalStatus,
    /// Reason recorded by the rejecting admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Submission timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// Last update timestamp.
    pub updated_at: DateTime<FixedOffset>,
}

impl From<donations::Model> for DonationView {
    fn from(donation: donations::Model) -> Self {
        Self {
            id: donation.id,
            donor_id: donation.donor_id,
            organization_name: donation.organization_name,
            contact_person: donation.contact_person,
            email: donation.email,
            phone: donation.phone,
            donation_type: donation.donation_type,
            purpose: donation.purpose,
            description: donation.description,
            estimated_amount: donation.estimated_amount,
            image_url: donation.image_url,
            status: donation.status,
            rejection_reason: donation.rejection_reason,
            created_at: donation.created_at,
            updated_at: donation.updated_at,
        }
    }
}

/// Supply request payload shared by the public board and the admin lists.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyRequestView {
    /// Request ID.
    pub id: Uuid,
    /// Owning school account ID.
    pub school_id: Uuid,
    /// Requesting school.
    pub school_name: String,
    /// Contact person.
    pub contact_person: String,
    /// Contact email.
    pub contact_email: String,
    /// Contact phone.
    pub contact_phone: String,
    /// Requested supply category.
    pub category: RequestCategory,
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Requested quantity.
    pub quantity: String,
    /// Urgency level.
    pub urgency: RequestUrgency,
    /// Delivery location.
    pub location: String,
    /// Storage key of the principal's letter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal_letter: Option<String>,
    /// Moderation status.
    pub status: ApprovalStatus,
    /// Reason recorded by the rejecting admin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Submission timestamp.
    pub created_at: DateTime<FixedOffset>,
    /// Last update timestamp.
    pub updated_at: DateTime<FixedOffset>,
}

impl From<supply_requests::Model> for SupplyRequestView {
    fn from(request: supply_requests::Model) -> Self {
        Self {
            id: request.id,
            school_id: request.school_id,
            school_name: request.school_name,
            contact_person: request.contact_person,
            contact_email: request.contact_email,
            contact_phone: request.contact_phone,
            category: request.category,
            title: request.title,
            description: request.description,
            quantity: request.quantity,
            urgency: request.urgency,
            location: request.location,
            principal_letter: request.principal_letter,
            status: request.status,
            rejection_reason: request.rejection_reason,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_account(role: AccountRole) -> accounts::Model {
        let now = Utc::now().fixed_offset();
        accounts::Model {
            id: Uuid::new_v4(),
            name: "Test Account".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$hash".to_string(),
            role,
            status: ApprovalStatus::Verified,
            rejection_reason: None,
            school_name: Some("Central College".to_string()),
            school_reg_no: None,
            school_type: None,
            province: None,
            district: None,
            address: Some("12 Lake Road".to_string()),
            school_contact: None,
            school_email: None,
            principal_name: None,
            principal_contact: None,
            website: None,
            registration_proof: None,
            verifying_authority: None,
            authority_contact: None,
            endorsement_letter: None,
            organization_name: Some("Bright Futures".to_string()),
            registration_number: None,
            organization_type: None,
            contact_number: Some("0771234567".to_string()),
            identity_certificate: None,
            representative_name: None,
            representative_position: None,
            representative_email: None,
            representative_phone: None,
            reference_partner: None,
            full_name: Some("Test Volunteer".to_string()),
            nic_front: None,
            nic_back: None,
            vehicle_type: Some("van".to_string()),
            availability: Some("weekends".to_string()),
            skills: Some("driving".to_string()),
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_school_summary_mirrors_school_name_into_organization() {
        let view = AccountSummary::project(&sample_account(AccountRole::School));
        assert_eq!(view.school_name.as_deref(), Some("Central College"));
        assert_eq!(view.organization_name.as_deref(), Some("Central College"));
        assert!(view.full_name.is_none());
    }

    #[test]
    fn test_donor_summary_keeps_only_organization() {
        let view = AccountSummary::project(&sample_account(AccountRole::Donor));
        assert_eq!(view.organization_name.as_deref(), Some("Bright Futures"));
        assert!(view.school_name.is_none());
        assert!(view.vehicle_type.is_none());
    }

    #[test]
    fn test_volunteer_summary_includes_logistics_fields() {
        let view = AccountSummary::project(&sample_account(AccountRole::Volunteer));
        assert_eq!(view.full_name.as_deref(), Some("Test Volunteer"));
        assert_eq!(view.vehicle_type.as_deref(), Some("van"));
        assert_eq!(view.contact_number.as_deref(), Some("0771234567"));
        assert!(view.organization_name.is_none());
    }

    #[test]
    fn test_admin_summary_has_no_profile_fields() {
        let view = AccountSummary::project(&sample_account(AccountRole::Admin));
        assert!(view.school_name.is_none());
        assert!(view.organization_name.is_none());
        assert!(view.full_name.is_none());
    }

    #[test]
    fn test_detail_never_exposes_password_hash() {
        let detail = AccountDetail::from(sample_account(AccountRole::Donor));
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "test@example.com");
    }

    #[test]
    fn test_detail_omits_unset_columns() {
        let detail = AccountDetail::from(sample_account(AccountRole::School));
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("schoolRegNo").is_none());
        assert_eq!(json["schoolName"], "Central College");
    }
}
