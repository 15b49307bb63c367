//! Account repository for registration, profile completion and moderation.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use edulink_core::lifecycle::{AccountRole, EntityKind, Lifecycle, LifecycleError, Transition};

use crate::entities::{accounts, sea_orm_active_enums};

use super::{role_to_core, role_to_db, status_to_db};

/// Input for creating a basic account ahead of profile completion.
#[derive(Debug, Clone)]
pub struct RegisterAccountInput {
    /// Display name.
    pub name: String,
    /// Login email; stored lowercased.
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Account role; immutable after creation.
    pub role: AccountRole,
}

/// School profile fields merged onto an account.
#[derive(Debug, Clone, Default)]
pub struct SchoolProfileInput {
    /// Official school name.
    pub school_name: Option<String>,
    /// Government registration number.
    pub school_reg_no: Option<String>,
    /// School type (National, Provincial, Private, ...).
    pub school_type: Option<String>,
    /// Province.
    pub province: Option<String>,
    /// District.
    pub district: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// School phone number.
    pub school_contact: Option<String>,
    /// School email address.
    pub school_email: Option<String>,
    /// Principal's name.
    pub principal_name: Option<String>,
    /// Principal's phone number.
    pub principal_contact: Option<String>,
    /// School website.
    pub website: Option<String>,
    /// Authority that can confirm the registration.
    pub verifying_authority: Option<String>,
    /// Contact for the verifying authority.
    pub authority_contact: Option<String>,
    /// Stored document key for the registration proof.
    pub registration_proof: Option<String>,
    /// Stored document key for the endorsement letter.
    pub endorsement_letter: Option<String>,
}

/// Donor profile fields merged onto an account.
#[derive(Debug, Clone, Default)]
pub struct DonorProfileInput {
    /// Donating organization name.
    pub organization_name: Option<String>,
    /// Organization registration number.
    pub registration_number: Option<String>,
    /// Organization type (NGO, Company, Foundation, ...).
    pub organization_type: Option<String>,
    /// Contact phone number.
    pub contact_number: Option<String>,
    /// Representative's name.
    pub representative_name: Option<String>,
    /// Representative's position.
    pub representative_position: Option<String>,
    /// Representative's email.
    pub representative_email: Option<String>,
    /// Representative's phone number.
    pub representative_phone: Option<String>,
    /// Partner organization that can vouch for the donor.
    pub reference_partner: Option<String>,
    /// Stored document key for the identity certificate.
    pub identity_certificate: Option<String>,
}

/// Volunteer profile fields merged onto an account.
#[derive(Debug, Clone, Default)]
pub struct VolunteerProfileInput {
    /// Legal full name.
    pub full_name: Option<String>,
    /// Contact phone number.
    pub contact_number: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Vehicle available for deliveries (none, car, van, ...).
    pub vehicle_type: Option<String>,
    /// Availability description.
    pub availability: Option<String>,
    /// Relevant skills.
    pub skills: Option<String>,
    /// Stored document key for the NIC front side.
    pub nic_front: Option<String>,
    /// Stored document key for the NIC back side.
    pub nic_back: Option<String>,
}

/// Updatable profile fields. Email, role and password are never touched here.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    /// Display name.
    pub name: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Contact phone number.
    pub contact_number: Option<String>,
    /// Official school name.
    pub school_name: Option<String>,
    /// School phone number.
    pub school_contact: Option<String>,
    /// School email address.
    pub school_email: Option<String>,
    /// Principal's name.
    pub principal_name: Option<String>,
    /// Principal's phone number.
    pub principal_contact: Option<String>,
    /// School website.
    pub website: Option<String>,
    /// Donating organization name.
    pub organization_name: Option<String>,
    /// Representative's name.
    pub representative_name: Option<String>,
    /// Representative's position.
    pub representative_position: Option<String>,
    /// Representative's email.
    pub representative_email: Option<String>,
    /// Representative's phone number.
    pub representative_phone: Option<String>,
    /// Legal full name.
    pub full_name: Option<String>,
    /// Vehicle available for deliveries.
    pub vehicle_type: Option<String>,
    /// Availability description.
    pub availability: Option<String>,
    /// Relevant skills.
    pub skills: Option<String>,
}

/// Account repository covering registration and moderation flows.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending account with the common fields only.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails (including a unique
    /// violation on the email column).
    pub async fn create_basic(
        &self,
        input: RegisterAccountInput,
    ) -> Result<accounts::Model, LifecycleError> {
        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(normalize_email(&input.email)),
            password_hash: Set(input.password_hash),
            role: Set(role_to_db(input.role)),
            status: Set(sea_orm_active_enums::ApprovalStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        account
            .insert(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Finds an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, LifecycleError> {
        accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Finds an account by email (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<accounts::Model>, LifecycleError> {
        accounts::Entity::find()
            .filter(accounts::Column::Email.eq(normalize_email(email)))
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, LifecycleError> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::Email.eq(normalize_email(email)))
            .count(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?;

        Ok(count > 0)
    }

    /// Stamps the account's last login time.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn record_login(&self, id: Uuid) -> Result<accounts::Model, LifecycleError> {
        let account = self.fetch(id).await?;

        let now = chrono::Utc::now().into();
        let mut active: accounts::ActiveModel = account.into();
        active.last_login_at = Set(Some(now));
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Merges school profile fields onto the account with the given email.
    ///
    /// A rejected account is reset to pending with its rejection reason
    /// cleared, putting it back in the admin's queue.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown email and `RoleMismatch` when the
    /// account is not registered as a school.
    pub async fn apply_school_profile(
        &self,
        email: &str,
        input: SchoolProfileInput,
    ) -> Result<accounts::Model, LifecycleError> {
        self.merge_profile(email, AccountRole::School, |active| {
            set_if_some(&mut active.school_name, input.school_name);
            set_if_some(&mut active.school_reg_no, input.school_reg_no);
            set_if_some(&mut active.school_type, input.school_type);
            set_if_some(&mut active.province, input.province);
            set_if_some(&mut active.district, input.district);
            set_if_some(&mut active.address, input.address);
            set_if_some(&mut active.school_contact, input.school_contact);
            set_if_some(&mut active.school_email, input.school_email);
            set_if_some(&mut active.principal_name, input.principal_name);
            set_if_some(&mut active.principal_contact, input.principal_contact);
            set_if_some(&mut active.website, input.website);
            set_if_some(&mut active.verifying_authority, input.verifying_authority);
            set_if_some(&mut active.authority_contact, input.authority_contact);
            set_if_some(&mut active.registration_proof, input.registration_proof);
            set_if_some(&mut active.endorsement_letter, input.endorsement_letter);
        })
        .await
    }

    /// Merges donor profile fields onto the account with the given email.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown email and `RoleMismatch` when the
    /// account is not registered as a donor.
    pub async fn apply_donor_profile(
        &self,
        email: &str,
        input: DonorProfileInput,
    ) -> Result<accounts::Model, LifecycleError> {
        self.merge_profile(email, AccountRole::Donor, |active| {
            set_if_some(&mut active.organization_name, input.organization_name);
            set_if_some(&mut active.registration_number, input.registration_number);
            set_if_some(&mut active.organization_type, input.organization_type);
            set_if_some(&mut active.contact_number, input.contact_number);
            set_if_some(&mut active.representative_name, input.representative_name);
            set_if_some(
                &mut active.representative_position,
                input.representative_position,
            );
            set_if_some(&mut active.representative_email, input.representative_email);
            set_if_some(&mut active.representative_phone, input.representative_phone);
            set_if_some(&mut active.reference_partner, input.reference_partner);
            set_if_some(&mut active.identity_certificate, input.identity_certificate);
        })
        .await
    }

    /// Merges volunteer profile fields onto the account with the given email.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown email and `RoleMismatch` when the
    /// account is not registered as a volunteer.
    pub async fn apply_volunteer_profile(
        &self,
        email: &str,
        input: VolunteerProfileInput,
    ) -> Result<accounts::Model, LifecycleError> {
        self.merge_profile(email, AccountRole::Volunteer, |active| {
            set_if_some(&mut active.full_name, input.full_name);
            set_if_some(&mut active.contact_number, input.contact_number);
            set_if_some(&mut active.address, input.address);
            set_if_some(&mut active.vehicle_type, input.vehicle_type);
            set_if_some(&mut active.availability, input.availability);
            set_if_some(&mut active.skills, input.skills);
            set_if_some(&mut active.nic_front, input.nic_front);
            set_if_some(&mut active.nic_back, input.nic_back);
        })
        .await
    }

    /// Updates the account's own editable profile fields.
    ///
    /// Provided fields overwrite; absent fields are left untouched. Email,
    /// role and password never change through this path.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn update_profile(
        &self,
        id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<accounts::Model, LifecycleError> {
        let account = self.fetch(id).await?;

        let now = chrono::Utc::now().into();
        let mut active: accounts::ActiveModel = account.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        set_if_some(&mut active.address, input.address);
        set_if_some(&mut active.contact_number, input.contact_number);
        set_if_some(&mut active.school_name, input.school_name);
        set_if_some(&mut active.school_contact, input.school_contact);
        set_if_some(&mut active.school_email, input.school_email);
        set_if_some(&mut active.principal_name, input.principal_name);
        set_if_some(&mut active.principal_contact, input.principal_contact);
        set_if_some(&mut active.website, input.website);
        set_if_some(&mut active.organization_name, input.organization_name);
        set_if_some(&mut active.representative_name, input.representative_name);
        set_if_some(
            &mut active.representative_position,
            input.representative_position,
        );
        set_if_some(&mut active.representative_email, input.representative_email);
        set_if_some(&mut active.representative_phone, input.representative_phone);
        set_if_some(&mut active.full_name, input.full_name);
        set_if_some(&mut active.vehicle_type, input.vehicle_type);
        set_if_some(&mut active.availability, input.availability);
        set_if_some(&mut active.skills, input.skills);

        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Replaces the account's password hash.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn change_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<accounts::Model, LifecycleError> {
        let account = self.fetch(id).await?;

        let now = chrono::Utc::now().into();
        let mut active: accounts::ActiveModel = account.into();
        active.password_hash = Set(password_hash.to_string());
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Approves an account. Valid from any current status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn approve(&self, id: Uuid) -> Result<accounts::Model, LifecycleError> {
        let account = self.fetch(id).await?;
        let transition = Lifecycle::for_kind(EntityKind::Account).approve();
        self.apply_transition(account, transition).await
    }

    /// Rejects an account with a reason.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist and
    /// `RejectionReasonRequired` when the reason is blank.
    pub async fn reject(&self, id: Uuid, reason: String) -> Result<accounts::Model, LifecycleError> {
        let account = self.fetch(id).await?;
        let transition = Lifecycle::for_kind(EntityKind::Account).reject(reason)?;
        self.apply_transition(account, transition).await
    }

    /// Deletes an account. Submissions cascade at the database level.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the account does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), LifecycleError> {
        let result = accounts::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(LifecycleError::NotFound {
                kind: EntityKind::Account,
            });
        }

        Ok(())
    }

    /// Lists accounts awaiting review, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending(&self) -> Result<Vec<accounts::Model>, LifecycleError> {
        accounts::Entity::find()
            .filter(accounts::Column::Status.eq(sea_orm_active_enums::ApprovalStatus::Pending))
            .order_by_desc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists every non-admin account, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_non_admin(&self) -> Result<Vec<accounts::Model>, LifecycleError> {
        accounts::Entity::find()
            .filter(accounts::Column::Role.ne(sea_orm_active_enums::AccountRole::Admin))
            .order_by_desc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists verified volunteers for the public directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_verified_volunteers(&self) -> Result<Vec<accounts::Model>, LifecycleError> {
        accounts::Entity::find()
            .filter(accounts::Column::Role.eq(sea_orm_active_enums::AccountRole::Volunteer))
            .filter(accounts::Column::Status.eq(sea_orm_active_enums::ApprovalStatus::Verified))
            .order_by_desc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Fetches an account by ID or fails with `NotFound`.
    async fn fetch(&self, id: Uuid) -> Result<accounts::Model, LifecycleError> {
        accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?
            .ok_or(LifecycleError::NotFound {
                kind: EntityKind::Account,
            })
    }

    /// Shared body of the three profile submissions: role check, field
    /// merge, and the rejected-to-pending reset from the lifecycle engine.
    async fn merge_profile<F>(
        &self,
        email: &str,
        expected: AccountRole,
        merge: F,
    ) -> Result<accounts::Model, LifecycleError>
    where
        F: FnOnce(&mut accounts::ActiveModel),
    {
        let account = self
            .find_by_email(email)
            .await?
            .ok_or(LifecycleError::NotFound {
                kind: EntityKind::Account,
            })?;

        if role_to_core(&account.role) != expected {
            return Err(LifecycleError::RoleMismatch { expected });
        }

        let reset = Lifecycle::for_kind(EntityKind::Account)
            .resubmit(super::status_to_core(&account.status))?;

        let now = chrono::Utc::now().into();
        let mut active: accounts::ActiveModel = account.into();
        merge(&mut active);

        if let Some(transition) = reset {
            active.status = Set(status_to_db(transition.to));
            active.rejection_reason = Set(transition.rejection_reason);
        }
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Applies an engine-produced transition in one read-modify-write.
    async fn apply_transition(
        &self,
        account: accounts::Model,
        transition: Transition,
    ) -> Result<accounts::Model, LifecycleError> {
        let now = chrono::Utc::now().into();
        let mut active: accounts::ActiveModel = account.into();
        active.status = Set(status_to_db(transition.to));
        active.rejection_reason = Set(transition.rejection_reason);
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }
}

/// Lowercases and trims an email for storage and lookups.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Overwrites an optional column only when a new value was provided.
fn set_if_some(slot: &mut ActiveValue<Option<String>>, value: Option<String>) {
    if let Some(v) = value {
        *slot = Set(Some(v));
    }
}
