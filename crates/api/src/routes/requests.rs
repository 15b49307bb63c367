//! Supply request routes: public listing, school submission and admin
//! moderation.
//!
//! Mirrors the donation routes with schools as owners. Submission is
//! multipart because a request may carry a principal's letter.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::middleware::{AuthAccount, OptionalAuthAccount};
use crate::routes::{RejectRequest, lifecycle_error, multipart_error, upload_error};
use crate::views::{SupplyRequestView, core_status};
use edulink_core::lifecycle::{AccessGuard, AccountRole, EntityKind, LifecycleError, Viewer};
use edulink_core::storage::DocumentKind;
use edulink_db::{
    SupplyRequestRepository,
    entities::{
        sea_orm_active_enums::{RequestCategory, RequestUrgency},
        supply_requests,
    },
    repositories::supply_request::CreateSupplyRequestInput,
};

/// Creates the public supply request router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(list_requests))
        .route("/requests/{id}", get(get_request))
}

/// Creates the supply request router for routes behind the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", post(create_request))
        .route("/requests/my-requests", get(my_requests))
        .route("/requests/complete/{id}", put(complete_request))
        .route("/requests/admin/pending", get(pending_requests))
        .route("/requests/admin/all", get(all_requests))
        .route("/requests/approve/{id}", put(approve_request))
        .route("/requests/reject/{id}", put(reject_request))
        .route("/requests/{id}", delete(delete_request))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Text fields collected from the multipart submission form.
#[derive(Debug, Default)]
struct RequestForm {
    school_name: Option<String>,
    contact_person: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    category: Option<String>,
    title: Option<String>,
    description: Option<String>,
    quantity: Option<String>,
    urgency: Option<String>,
    location: Option<String>,
    principal_letter: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /requests - List all verified supply requests (public).
async fn list_requests(State(state): State<AppState>) -> impl IntoResponse {
    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.list_verified().await {
        Ok(rows) => request_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// GET /requests/{id} - Fetch a single supply request.
///
/// Unverified requests are served only to the owning school and admins.
async fn get_request(
    State(state): State<AppState>,
    maybe_auth: OptionalAuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SupplyRequestRepository::new((*state.db).clone());

    let request = match repo.find_by_id(id).await {
        Ok(Some(request)) => request,
        Ok(None) => {
            return lifecycle_error(&LifecycleError::NotFound {
                kind: EntityKind::SupplyRequest,
            });
        }
        Err(e) => return lifecycle_error(&e),
    };

    let viewer = maybe_auth.0.as_ref().map(|auth| Viewer {
        id: auth.account_id(),
        role: auth.role(),
    });

    if !AccessGuard::can_view(core_status(&request.status), request.school_id, viewer.as_ref()) {
        return lifecycle_error(&LifecycleError::ViewDenied {
            kind: EntityKind::SupplyRequest,
        });
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "request": SupplyRequestView::from(request)
        })),
    )
        .into_response()
}

/// POST /requests - Submit a supply request (verified schools only).
///
/// Multipart form: the text fields of the request plus an optional
/// `principalLetter` document.
async fn create_request(
    State(state): State<AppState>,
    auth: AuthAccount,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut form = RequestForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(&e),
        };
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == "principalLetter" {
            let Some(filename) = field.file_name().map(ToString::to_string) else {
                continue;
            };
            if filename.is_empty() {
                continue;
            }
            let data = match field.bytes().await {
                Ok(data) => data,
                Err(e) => return multipart_error(&e),
            };
            let stored = match state
                .storage
                .store(DocumentKind::SupplyRequest, &name, &filename, data)
                .await
            {
                Ok(doc) => doc,
                Err(e) => return upload_error(&e),
            };
            form.principal_letter = Some(stored.key);
            continue;
        }

        let value = match field.text().await {
            Ok(value) => value,
            Err(e) => return multipart_error(&e),
        };
        if value.is_empty() {
            continue;
        }
        match name.as_str() {
            "schoolName" => form.school_name = Some(value),
            "contactPerson" => form.contact_person = Some(value),
            "contactEmail" => form.contact_email = Some(value),
            "contactPhone" => form.contact_phone = Some(value),
            "category" => form.category = Some(value),
            "title" => form.title = Some(value),
            "description" => form.description = Some(value),
            "quantity" => form.quantity = Some(value),
            "urgency" => form.urgency = Some(value),
            "location" => form.location = Some(value),
            _ => {}
        }
    }

    let input = match build_request_input(form) {
        Ok(input) => input,
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

    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.create(auth.account_id(), input).await {
        Ok(request) => {
            info!(
                request_id = %request.id,
                school_id = %request.school_id,
                "Supply request submitted"
            );
            (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "message": "Request submitted successfully! Awaiting admin approval.",
                    "request": SupplyRequestView::from(request)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// GET /requests/my-requests - List the caller's own supply requests.
async fn my_requests(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if auth.role() != AccountRole::School {
        return lifecycle_error(&LifecycleError::RoleNotAllowed {
            kind: EntityKind::SupplyRequest,
            role: auth.role(),
        });
    }

    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.list_mine(auth.account_id()).await {
        Ok(rows) => request_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /requests/complete/{id} - Mark a verified supply request as completed.
///
/// Only the owning school can complete a request.
async fn complete_request(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.complete(id, auth.account_id()).await {
        Ok(request) => {
            info!(request_id = %request.id, "Supply request completed");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Request marked as completed successfully",
                    "request": SupplyRequestView::from(request)
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

/// GET /requests/admin/pending - List supply requests awaiting review.
async fn pending_requests(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.list_pending().await {
        Ok(rows) => request_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// GET /requests/admin/all - List every supply request regardless of status.
async fn all_requests(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.list_all().await {
        Ok(rows) => request_list(rows),
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /requests/approve/{id} - Approve a pending supply request.
async fn approve_request(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.approve(id).await {
        Ok(request) => {
            info!(request_id = %request.id, admin_id = %auth.account_id(), "Supply request approved");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Request approved successfully",
                    "request": SupplyRequestView::from(request)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /requests/reject/{id} - Reject a pending supply request with a reason.
async fn reject_request(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.reject(id, payload.reason.unwrap_or_default()).await {
        Ok(request) => {
            info!(request_id = %request.id, admin_id = %auth.account_id(), "Supply request rejected");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Request rejected",
                    "request": SupplyRequestView::from(request)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// DELETE /requests/{id} - Delete a supply request (admin only).
async fn delete_request(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = SupplyRequestRepository::new((*state.db).clone());

    match repo.delete(id).await {
        Ok(()) => {
            info!(request_id = %id, admin_id = %auth.account_id(), "Supply request deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Request deleted successfully"
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

/// Renders a supply request collection response with a count.
fn request_list(rows: Vec<supply_requests::Model>) -> Response {
    let requests: Vec<SupplyRequestView> = rows.into_iter().map(SupplyRequestView::from).collect();
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "count": requests.len(),
            "requests": requests
        })),
    )
        .into_response()
}

/// Validates the collected form and builds the repository input.
fn build_request_input(form: RequestForm) -> Result<CreateSupplyRequestInput, &'static str> {
    let missing = "All request fields are required";

    let school_name = non_empty(form.school_name).ok_or(missing)?;
    let contact_person = non_empty(form.contact_person).ok_or(missing)?;
    let contact_email = non_empty(form.contact_email).ok_or(missing)?;
    let contact_phone = non_empty(form.contact_phone).ok_or(missing)?;
    let category = non_empty(form.category).ok_or(missing)?;
    let title = non_empty(form.title).ok_or(missing)?;
    let description = non_empty(form.description).ok_or(missing)?;
    let quantity = non_empty(form.quantity).ok_or(missing)?;
    let urgency = non_empty(form.urgency).ok_or(missing)?;
    let location = non_empty(form.location).ok_or(missing)?;

    let category = parse_category(&category).ok_or("Invalid request category")?;
    let urgency = parse_urgency(&urgency).ok_or("Invalid request urgency")?;

    Ok(CreateSupplyRequestInput {
        school_name,
        contact_person,
        contact_email,
        contact_phone,
        category,
        title,
        description,
        quantity,
        urgency,
        location,
        principal_letter: form.principal_letter,
    })
}

/// Returns the trimmed value when present and non-blank.
fn non_empty(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses a kebab-case supply request category. Funds cannot be requested.
fn parse_category(value: &str) -> Option<RequestCategory> {
    match value {
        "books" => Some(RequestCategory::Books),
        "uniforms" => Some(RequestCategory::Uniforms),
        "digital-devices" => Some(RequestCategory::DigitalDevices),
        "stationery" => Some(RequestCategory::Stationery),
        "furniture" => Some(RequestCategory::Furniture),
        "other" => Some(RequestCategory::Other),
        _ => None,
    }
}

/// Parses a request urgency level.
fn parse_urgency(value: &str) -> Option<RequestUrgency> {
    match value {
        "low" => Some(RequestUrgency::Low),
        "medium" => Some(RequestUrgency::Medium),
        "high" => Some(RequestUrgency::High),
        _ => None,
    }
}
