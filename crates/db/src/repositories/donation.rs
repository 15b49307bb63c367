//! Donation repository for submission, listing and moderation.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use edulink_core::lifecycle::{AccessGuard, EntityKind, Lifecycle, LifecycleError, Transition};

use crate::entities::{accounts, donations, sea_orm_active_enums};

use super::{role_to_core, status_to_core, status_to_db};

/// Input for submitting a donation offer.
#[derive(Debug, Clone)]
pub struct CreateDonationInput {
    /// Donating organization name.
    pub organization_name: String,
    /// Contact person for this offer.
    pub contact_person: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Category of the donated goods.
    pub donation_type: sea_orm_active_enums::DonationType,
    /// What the donation is intended for.
    pub purpose: String,
    /// Free-form description of the offer.
    pub description: String,
    /// Estimated value, kept as entered.
    pub estimated_amount: String,
    /// Stored document key for an illustrating image.
    pub image_url: Option<String>,
}

/// Donation repository covering submission and moderation flows.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    db: DatabaseConnection,
}

impl DonationRepository {
    /// Creates a new donation repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending donation for a verified donor account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown donor, `RoleNotAllowed` when the
    /// account is not a donor, and `AccountNotVerified` when it has not
    /// been approved yet.
    pub async fn create(
        &self,
        donor_id: Uuid,
        input: CreateDonationInput,
    ) -> Result<donations::Model, LifecycleError> {
        let donor = accounts::Entity::find_by_id(donor_id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?
            .ok_or(LifecycleError::NotFound {
                kind: EntityKind::Account,
            })?;

        AccessGuard::check_submission(
            EntityKind::Donation,
            role_to_core(&donor.role),
            status_to_core(&donor.status),
        )?;

        let now = chrono::Utc::now().into();
        let donation = donations::ActiveModel {
            id: Set(Uuid::new_v4()),
            donor_id: Set(donor_id),
            organization_name: Set(input.organization_name),
            contact_person: Set(input.contact_person),
            email: Set(input.email),
            phone: Set(input.phone),
            donation_type: Set(input.donation_type),
            purpose: Set(input.purpose),
            description: Set(input.description),
            estimated_amount: Set(input.estimated_amount),
            image_url: Set(input.image_url),
            status: Set(sea_orm_active_enums::ApprovalStatus::Pending),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        donation
            .insert(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Finds a donation by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<donations::Model>, LifecycleError> {
        donations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists verified donations for the public feed, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_verified(&self) -> Result<Vec<donations::Model>, LifecycleError> {
        donations::Entity::find()
            .filter(donations::Column::Status.eq(sea_orm_active_enums::ApprovalStatus::Verified))
            .order_by_desc(donations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists the donor's own donations in every status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_mine(&self, donor_id: Uuid) -> Result<Vec<donations::Model>, LifecycleError> {
        donations::Entity::find()
            .filter(donations::Column::DonorId.eq(donor_id))
            .order_by_desc(donations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists donations awaiting review, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending(&self) -> Result<Vec<donations::Model>, LifecycleError> {
        donations::Entity::find()
            .filter(donations::Column::Status.eq(sea_orm_active_enums::ApprovalStatus::Pending))
            .order_by_desc(donations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists every donation regardless of status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<donations::Model>, LifecycleError> {
        donations::Entity::find()
            .order_by_desc(donations::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Approves a donation. Valid from any current status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the donation does not exist.
    pub async fn approve(&self, id: Uuid) -> Result<donations::Model, LifecycleError> {
        let donation = self.fetch(id).await?;
        let transition = Lifecycle::for_kind(EntityKind::Donation).approve();
        self.apply_transition(donation, transition).await
    }

    /// Rejects a donation with a reason. Rejection is terminal.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the donation does not exist and
    /// `RejectionReasonRequired` when the reason is blank.
    pub async fn reject(
        &self,
        id: Uuid,
        reason: String,
    ) -> Result<donations::Model, LifecycleError> {
        let donation = self.fetch(id).await?;
        let transition = Lifecycle::for_kind(EntityKind::Donation).reject(reason)?;
        self.apply_transition(donation, transition).await
    }

    /// Marks a verified donation as completed by its owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the donation does not exist, `NotOwner` when
    /// the caller did not submit it, and `InvalidTransition` when it is
    /// not currently verified.
    pub async fn complete(
        &self,
        id: Uuid,
        caller_id: Uuid,
    ) -> Result<donations::Model, LifecycleError> {
        let donation = self.fetch(id).await?;

        AccessGuard::require_owner(EntityKind::Donation, caller_id, donation.donor_id)?;
        let transition =
            Lifecycle::for_kind(EntityKind::Donation).complete(status_to_core(&donation.status))?;

        self.apply_transition(donation, transition).await
    }

    /// Deletes a donation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the donation does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), LifecycleError> {
        let result = donations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(LifecycleError::NotFound {
                kind: EntityKind::Donation,
            });
        }

        Ok(())
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Fetches a donation by ID or fails with `NotFound`.
    async fn fetch(&self, id: Uuid) -> Result<donations::Model, LifecycleError> {
        donations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?
            .ok_or(LifecycleError::NotFound {
                kind: EntityKind::Donation,
            })
    }

    /// Applies an engine-produced transition in one read-modify-write.
    async fn apply_transition(
        &self,
        donation: donations::Model,
        transition: Transition,
    ) -> Result<donations::Model, LifecycleError> {
        let now = chrono::Utc::now().into();
        let mut active: donations::ActiveModel = donation.into();
        active.status = Set(status_to_db(transition.to));
        active.rejection_reason = Set(transition.rejection_reason);
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }
}
