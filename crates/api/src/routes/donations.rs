//! Donation offer routes: public listing, donor submission and admin
//! moderation.
//!
//! Verified donations are public. Pending and rejected ones are visible
//! only to the owning donor and admins, which is why the single-donation
//! read accepts an optional bearer token.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::{AuthAccount, OptionalAuthAccount};
use crate::routes::{RejectRequest, lifecycle_error};
use crate::views::{DonationView, core_status};
use edulink_core::lifecycle::{AccessGuard, AccountRole, EntityKind, LifecycleError, Viewer};
use edulink_db::{
    DonationRepository,
    entities::{donations, sea_orm_active_enums::DonationType},
    repositories::donation::CreateDonationInput,
};

/// Creates the public donations router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/donations", get(list_donations))
        .route("/donations/{id}", get(get_donation))
}

/// Creates the donations router for routes behind the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/donations", post(create_donation))
        .route("/donations/my-donations", get(my_donations))
        .route("/donations/complete/{id}", put(complete_donation))
        .route("/donations/admin/pending", get(pending_donations))
        .route("/donations/admin/all", get(all_donations))
        .route("/donations/approve/{id}", put(approve_donation))
        .route("/donations/reject/{id}", put(reject_donation))
        .route("/donations/{id}", delete(delete_donation))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body for submitting a donation offer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    /// Donating organization name.
    pub organization_name: String,
    /// Contact person for this offer.
    pub contact_person: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Category of the donated goods, in kebab-case.
    pub donation_type: String,
    /// What the donation is intended for.
    pub purpose: String,
    /// Free-form description of the offer.
    pub description: String,
    /// Estimated value, kept as entered.
    pub estimated_amount: String,
    /// Stored document key for an illustrating image.
    #[serde(default)]
    pub image_url: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /donations - List all verified donations (public).
async fn list_donations(State(state): State<AppState>) -> impl IntoResponse {
    let repo = DonationRepository::new((*state.db).clone());

    match repo.list_verified().await {
        Ok(rows) => donation_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// GET /donations/{id} - Fetch a single donation.
///
/// Unverified donations are served only to the owning donor and admins.
async fn get_donation(
    State(state): State<AppState>,
    maybe_auth: OptionalAuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = DonationRepository::new((*state.db).clone());

    let donation = match repo.find_by_id(id).await {
        Ok(Some(donation)) => donation,
        Ok(None) => {
            return lifecycle_error(&LifecycleError::NotFound {
                kind: EntityKind::Donation,
            });
        }
        Err(e) => return lifecycle_error(&e),
    };

    let viewer = maybe_auth.0.as_ref().map(|auth| Viewer {
        id: auth.account_id(),
        role: auth.role(),
    });

    if !AccessGuard::can_view(core_status(&donation.status), donation.donor_id, viewer.as_ref()) {
        return lifecycle_error(&LifecycleError::ViewDenied {
            kind: EntityKind::Donation,
        });
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "donation": DonationView::from(donation)
        })),
    )
        .into_response()
}

/// POST /donations - Submit a donation offer (verified donors only).
async fn create_donation(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(payload): Json<CreateDonationRequest>,
) -> impl IntoResponse {
    let donation_type = match validate_donation(&payload) {
        Ok(donation_type) => donation_type,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "VALIDATION_ERROR",
                    "message": message
                })),
            )
                .into_response();
        }
    };

    let repo = DonationRepository::new((*state.db).clone());

    let input = CreateDonationInput {
        organization_name: payload.organization_name.trim().to_string(),
        contact_person: payload.contact_person.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        donation_type,
        purpose: payload.purpose.trim().to_string(),
        description: payload.description.trim().to_string(),
        estimated_amount: payload.estimated_amount.trim().to_string(),
        image_url: payload.image_url,
    };

    match repo.create(auth.account_id(), input).await {
        Ok(donation) => {
            info!(
                donation_id = %donation.id,
                donor_id = %donation.donor_id,
                "Donation submitted"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Donation submitted successfully! Awaiting admin approval.",
                    "donation": DonationView::from(donation)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// GET /donations/my-donations - List the caller's own donations.
async fn my_donations(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if auth.role() != AccountRole::Donor {
        return lifecycle_error(&LifecycleError::RoleNotAllowed {
            kind: EntityKind::Donation,
            role: auth.role(),
        });
    }

    let repo = DonationRepository::new((*state.db).clone());

    match repo.list_mine(auth.account_id()).await {
        Ok(rows) => donation_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /donations/complete/{id} - Mark a verified donation as completed.
///
/// Only the owning donor can complete a donation.
async fn complete_donation(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = DonationRepository::new((*state.db).clone());

    match repo.complete(id, auth.account_id()).await {
        Ok(donation) => {
            info!(donation_id = %donation.id, "Donation completed");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Donation marked as completed successfully",
                    "donation": DonationView::from(donation)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

// ============================================================================
// Admin Routes
// ============================================================================

/// GET /donations/admin/pending - List donations awaiting review.
async fn pending_donations(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = DonationRepository::new((*state.db).clone());

    match repo.list_pending().await {
        Ok(rows) => donation_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// GET /donations/admin/all - List every donation regardless of status.
async fn all_donations(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = DonationRepository::new((*state.db).clone());

    match repo.list_all().await {
        Ok(rows) => donation_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /donations/approve/{id} - Approve a pending donation.
async fn approve_donation(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = DonationRepository::new((*state.db).clone());

    match repo.approve(id).await {
        Ok(donation) => {
            info!(donation_id = %donation.id, admin_id = %auth.account_id(), "Donation approved");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Donation approved successfully",
                    "donation": DonationView::from(donation)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /donations/reject/{id} - Reject a pending donation with a reason.
async fn reject_donation(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = DonationRepository::new((*state.db).clone());

    match repo.reject(id, payload.reason.unwrap_or_default()).await {
        Ok(donation) => {
            info!(donation_id = %donation.id, admin_id = %auth.account_id(), "Donation rejected");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Donation rejected",
                    "donation": DonationView::from(donation)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// DELETE /donations/{id} - Delete a donation (admin only).
async fn delete_donation(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = DonationRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(donation_id = %id, admin_id = %auth.account_id(), "Donation deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Donation deleted successfully"
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Renders a donation collection response with a count.
fn donation_list(rows: Vec<donations::Model>) -> Response {
    let donations: Vec<DonationView> = rows.into_iter().map(DonationView::from).collect();
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "count": donations.len(),
            "donations": donations
        })),
    )
        .into_response()
}

/// Validates a donation submission and parses its category.
fn validate_donation(payload: &CreateDonationRequest) -> Result<DonationType, &'static str> {
    let required = [
        &payload.organization_name,
        &payload.contact_person,
        &payload.email,
        &payload.phone,
        &payload.purpose,
        &payload.description,
        &payload.estimated_amount,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err("All donation fields are required");
    }

    parse_donation_type(&payload.donation_type).ok_or("Invalid donation type")
}

/// Parses a kebab-case donation category.
fn parse_donation_type(value: &str) -> Option<DonationType> {
    match value {
        "books" => Some(DonationType::Books),
        "uniforms" => Some(DonationType::Uniforms),
        "digital-devices" => Some(DonationType::DigitalDevices),
        "stationery" => Some(DonationType::Stationery),
        "furniture" => Some(DonationType::Furniture),
        "funds" => Some(DonationType::Funds),
        "other" => Some(DonationType::Other),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn donation_request(donation_type: &str) -> CreateDonationRequest {
        CreateDonationRequest {
            organization_name: "Bright Futures Ltd".to_string(),
            contact_person: "Amara Perera".to_string(),
            email: "amara@brightfutures.example".to_string(),
            phone: "+94 71 234 5678".to_string(),
            donation_type: donation_type.to_string(),
            purpose: "Library restock".to_string(),
            description: "Two hundred science textbooks".to_string(),
            estimated_amount: "150000".to_string(),
            image_url: None,
        }
    }

    #[rstest]
    #[case("books", DonationType::Books)]
    #[case("uniforms", DonationType::Uniforms)]
    #[case("digital-devices", DonationType::DigitalDevices)]
    #[case("stationery", DonationType::Stationery)]
    #[case("furniture", DonationType::Furniture)]
    #[case("funds", DonationType::Funds)]
    #[case("other", DonationType::Other)]
    fn test_parse_donation_type(#[case] value: &str, #[case] expected: DonationType) {
        assert_eq!(parse_donation_type(value), Some(expected));
    }

    #[rstest]
    #[case("food")]
    #[case("Books")]
    #[case("digital devices")]
    #[case("")]
    fn test_parse_donation_type_rejects_unknown(#[case] value: &str) {
        assert!(parse_donation_type(value).is_none());
    }

    #[test]
    fn test_validate_donation_accepts_complete_payload() {
        let payload = donation_request("books");
        assert_eq!(validate_donation(&payload), Ok(DonationType::Books));
    }

    #[test]
    fn test_validate_donation_rejects_blank_fields() {
        let mut payload = donation_request("books");
        payload.purpose = "   ".to_string();
        assert_eq!(
            validate_donation(&payload),
            Err("All donation fields are required")
        );

        let mut payload = donation_request("books");
        payload.organization_name = String::new();
        assert_eq!(
            validate_donation(&payload),
            Err("All donation fields are required")
        );
    }

    #[test]
    fn test_validate_donation_rejects_unknown_type() {
        let payload = donation_request("vehicles");
        assert_eq!(validate_donation(&payload), Err("Invalid donation type"));
    }
}
