//! Authentication types for JWT and request payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for bearer tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account ID).
    pub sub: Uuid,
    /// Account role.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for an account.
    #[must_use]
    pub fn new(account_id: Uuid, role: &str, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the account ID from claims.
    #[must_use]
    pub const fn account_id(&self) -> Uuid {
        self.sub
    }
}

/// Basic registration request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Requested role: `school`, `donor` or `volunteer`.
    pub role: String,
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Change password request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password, verified before the change.
    #[serde(rename = "currentPassword")]
    pub current_password: String,
    /// New password.
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// Profile update request payload.
///
/// Every field is optional; only provided fields are written. Email, role
/// and password can never be changed through this payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// Display name.
    pub name: Option<String>,
    /// Street address (school / volunteer).
    pub address: Option<String>,
    /// Contact number (donor / volunteer).
    pub contact_number: Option<String>,
    /// School name.
    pub school_name: Option<String>,
    /// School contact number.
    pub school_contact: Option<String>,
    /// School contact email.
    pub school_email: Option<String>,
    /// Principal name.
    pub principal_name: Option<String>,
    /// Principal contact number.
    pub principal_contact: Option<String>,
    /// School website.
    pub website: Option<String>,
    /// Donor organization name.
    pub organization_name: Option<String>,
    /// Donor representative name.
    pub representative_name: Option<String>,
    /// Donor representative position.
    pub representative_position: Option<String>,
    /// Donor representative email.
    pub representative_email: Option<String>,
    /// Donor representative phone.
    pub representative_phone: Option<String>,
    /// Volunteer full name.
    pub full_name: Option<String>,
    /// Volunteer vehicle type.
    pub vehicle_type: Option<String>,
    /// Volunteer availability.
    pub availability: Option<String>,
    /// Volunteer skills.
    pub skills: Option<String>,
}
