//! `SeaORM` Entity for the accounts table.
//!
//! One wide row per account. The common columns are always populated; the
//! profile columns are filled in by the role-specific profile submission
//! and stay NULL for every other role.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{AccountRole, ApprovalStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub role: AccountRole,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,

    // School profile
    pub school_name: Option<String>,
    pub school_reg_no: Option<String>,
    pub school_type: Option<String>,
    pub province: Option<String>,
    pub district: Option<String>,
    pub address: Option<String>,
    pub school_contact: Option<String>,
    pub school_email: Option<String>,
    pub principal_name: Option<String>,
    pub principal_contact: Option<String>,
    pub website: Option<String>,
    pub registration_proof: Option<String>,
    pub verifying_authority: Option<String>,
    pub authority_contact: Option<String>,
    pub endorsement_letter: Option<String>,

    // Donor profile
    pub organization_name: Option<String>,
    pub registration_number: Option<String>,
    pub organization_type: Option<String>,
    pub contact_number: Option<String>,
    pub identity_certificate: Option<String>,
    pub representative_name: Option<String>,
    pub representative_position: Option<String>,
    pub representative_email: Option<String>,
    pub representative_phone: Option<String>,
    pub reference_partner: Option<String>,

    // Volunteer profile
    pub full_name: Option<String>,
    pub nic_front: Option<String>,
    pub nic_back: Option<String>,
    pub vehicle_type: Option<String>,
    pub availability: Option<String>,
    pub skills: Option<String>,

    pub last_login_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::donations::Entity")]
    Donations,
    #[sea_orm(has_many = "super::supply_requests::Entity")]
    SupplyRequests,
}

impl Related<super::donations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Donations.def()
    }
}

impl Related<super::supply_requests::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplyRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
