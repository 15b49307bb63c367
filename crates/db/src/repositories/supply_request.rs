//! Supply request repository for submission, listing and moderation.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use edulink_core::lifecycle::{AccessGuard, EntityKind, Lifecycle, LifecycleError, Transition};

use crate::entities::{accounts, sea_orm_active_enums, supply_requests};

use super::{role_to_core, status_to_core, status_to_db};

/// Input for submitting a supply request.
#[derive(Debug, Clone)]
pub struct CreateSupplyRequestInput {
    /// Requesting school name.
    pub school_name: String,
    /// Contact person for this request.
    pub contact_person: String,
    /// Contact email.
    pub contact_email: String,
    /// Contact phone number.
    pub contact_phone: String,
    /// Category of the needed supplies.
    pub category: sea_orm_active_enums::RequestCategory,
    /// Short title for the request.
    pub title: String,
    /// Free-form description of the need.
    pub description: String,
    /// Needed quantity, kept as entered.
    pub quantity: String,
    /// How urgent the need is.
    pub urgency: sea_orm_active_enums::RequestUrgency,
    /// Delivery location.
    pub location: String,
    /// Stored document key for the principal's letter.
    pub principal_letter: Option<String>,
}

/// Supply request repository covering submission and moderation flows.
#[derive(Debug, Clone)]
pub struct SupplyRequestRepository {
    db: DatabaseConnection,
}

impl SupplyRequestRepository {
    /// Creates a new supply request repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending supply request for a verified school account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown school, `RoleNotAllowed` when the
    /// account is not a school, and `AccountNotVerified` when it has not
    /// been approved yet.
    pub async fn create(
        &self,
        school_id: Uuid,
        input: CreateSupplyRequestInput,
    ) -> Result<supply_requests::Model, LifecycleError> {
        let school = accounts::Entity::find_by_id(school_id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?
            .ok_or(LifecycleError::NotFound {
                kind: EntityKind::Account,
            })?;

        AccessGuard::check_submission(
            EntityKind::SupplyRequest,
            role_to_core(&school.role),
            status_to_core(&school.status),
        )?;

        let now = chrono::Utc::now().into();
        let request = supply_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            school_id: Set(school_id),
            school_name: Set(input.school_name),
            contact_person: Set(input.contact_person),
            contact_email: Set(input.contact_email),
            contact_phone: Set(input.contact_phone),
            category: Set(input.category),
            title: Set(input.title),
            description: Set(input.description),
            quantity: Set(input.quantity),
            urgency: Set(input.urgency),
            location: Set(input.location),
            principal_letter: Set(input.principal_letter),
            status: Set(sea_orm_active_enums::ApprovalStatus::Pending),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        request
            .insert(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Finds a supply request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<supply_requests::Model>, LifecycleError> {
        supply_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists verified supply requests for the public feed, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_verified(&self) -> Result<Vec<supply_requests::Model>, LifecycleError> {
        supply_requests::Entity::find()
            .filter(
                supply_requests::Column::Status
                    .eq(sea_orm_active_enums::ApprovalStatus::Verified),
            )
            .order_by_desc(supply_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists the school's own requests in every status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_mine(
        &self,
        school_id: Uuid,
    ) -> Result<Vec<supply_requests::Model>, LifecycleError> {
        supply_requests::Entity::find()
            .filter(supply_requests::Column::SchoolId.eq(school_id))
            .order_by_desc(supply_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists supply requests awaiting review, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_pending(&self) -> Result<Vec<supply_requests::Model>, LifecycleError> {
        supply_requests::Entity::find()
            .filter(
                supply_requests::Column::Status.eq(sea_orm_active_enums::ApprovalStatus::Pending),
            )
            .order_by_desc(supply_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Lists every supply request regardless of status, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<supply_requests::Model>, LifecycleError> {
        supply_requests::Entity::find()
            .order_by_desc(supply_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }

    /// Approves a supply request. Valid from any current status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist.
    pub async fn approve(&self, id: Uuid) -> Result<supply_requests::Model, LifecycleError> {
        let request = self.fetch(id).await?;
        let transition = Lifecycle::for_kind(EntityKind::SupplyRequest).approve();
        self.apply_transition(request, transition).await
    }

    /// Rejects a supply request with a reason. Rejection is terminal.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist and
    /// `RejectionReasonRequired` when the reason is blank.
    pub async fn reject(
        &self,
        id: Uuid,
        reason: String,
    ) -> Result<supply_requests::Model, LifecycleError> {
        let request = self.fetch(id).await?;
        let transition = Lifecycle::for_kind(EntityKind::SupplyRequest).reject(reason)?;
        self.apply_transition(request, transition).await
    }

    /// Marks a verified supply request as fulfilled by its owner.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist, `NotOwner` when
    /// the caller did not submit it, and `InvalidTransition` when it is
    /// not currently verified.
    pub async fn complete(
        &self,
        id: Uuid,
        caller_id: Uuid,
    ) -> Result<supply_requests::Model, LifecycleError> {
        let request = self.fetch(id).await?;

        AccessGuard::require_owner(EntityKind::SupplyRequest, caller_id, request.school_id)?;
        let transition = Lifecycle::for_kind(EntityKind::SupplyRequest)
            .complete(status_to_core(&request.status))?;

        self.apply_transition(request, transition).await
    }

    /// Deletes a supply request.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the request does not exist.
    pub async fn delete(&self, id: Uuid) -> Result<(), LifecycleError> {
        let result = supply_requests::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(LifecycleError::NotFound {
                kind: EntityKind::SupplyRequest,
            });
        }

        Ok(())
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Fetches a supply request by ID or fails with `NotFound`.
    async fn fetch(&self, id: Uuid) -> Result<supply_requests::Model, LifecycleError> {
        supply_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))?
            .ok_or(LifecycleError::NotFound {
                kind: EntityKind::SupplyRequest,
            })
    }

    /// Applies an engine-produced transition in one read-modify-write.
    async fn apply_transition(
        &self,
        request: supply_requests::Model,
        transition: Transition,
    ) -> Result<supply_requests::Model, LifecycleError> {
        let now = chrono::Utc::now().into();
        let mut active: supply_requests::ActiveModel = request.into();
        active.status = Set(status_to_db(transition.to));
        active.rejection_reason = Set(transition.rejection_reason);
        active.updated_at = Set(now);

        active
            .update(&self.db)
            .await
            .map_err(|e| LifecycleError::Database(e.to_string()))
    }
}
