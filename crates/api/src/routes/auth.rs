//! Registration, login, profile and account moderation routes.
//!
//! Registration is two-step: a basic account first, then a role-specific
//! profile submitted by email while the account is still pending. Admin
//! moderation of accounts lives here as well.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use crate::middleware::AuthAccount;
use crate::routes::{RejectRequest, lifecycle_error, multipart_error, upload_error};
use crate::views::{AccountDetail, AccountSummary, VolunteerView};
use edulink_core::auth::{hash_password, verify_password};
use edulink_core::lifecycle::{AccessGuard, AccountRole, EntityKind, LifecycleError};
use edulink_core::storage::DocumentKind;
use edulink_db::{
    AccountRepository,
    entities::{accounts, sea_orm_active_enums::AccountRole as DbAccountRole},
    repositories::account::{
        DonorProfileInput, RegisterAccountInput, SchoolProfileInput, UpdateProfileInput,
        VolunteerProfileInput,
    },
};
use edulink_shared::auth::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
};

/// Creates the public auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register/basic", post(register_basic))
        .route("/auth/register/school-profile", post(complete_school_profile))
        .route("/auth/register/donor-profile", post(complete_donor_profile))
        .route(
            "/auth/register/volunteer-profile",
            post(complete_volunteer_profile),
        )
        .route("/auth/login", post(login))
        .route("/auth/volunteers", get(list_volunteers))
}

/// Creates the auth router for routes behind the auth middleware.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/profile", get(me))
        .route("/auth/update-profile", put(update_profile))
        .route("/auth/change-password", put(change_password))
        .route("/auth/logout", post(logout))
        .route("/auth/pending-users", get(pending_accounts))
        .route("/auth/all-users", get(all_accounts))
        .route("/auth/approve-user/{id}", put(approve_account))
        .route("/auth/reject-user/{id}", put(reject_account))
        .route("/auth/delete-user/{id}", delete(delete_account))
}

// ============================================================================
// Registration and Login
// ============================================================================

/// POST /auth/register/basic - Create a pending account (step 1 of 2).
async fn register_basic(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let role = match validate_registration(&payload) {
        Ok(role) => role,
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

    let repo = AccountRepository::new((*state.db).clone());

    // Check if email already exists
    match repo.email_exists(&payload.email).await {
        Ok(true) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": "EMAIL_TAKEN",
                    "message": "Email already registered"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => return lifecycle_error(&e),
    }

    // Hash password
    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return registration_failed();
        }
    };

    let account = match repo
        .create_basic(RegisterAccountInput {
            name: payload.name.trim().to_string(),
            email: payload.email,
            password_hash,
            role,
        })
        .await
    {
        Ok(account) => account,
        Err(e) => return lifecycle_error(&e),
    };

    let token = match state.jwt_service.generate_token(account.id, role.as_str()) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return registration_failed();
        }
    };

    info!(account_id = %account.id, role = %role, "New account registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Basic registration successful. Please complete your profile.",
            "token": token,
            "user": AccountSummary::project(&account)
        })),
    )
        .into_response()
}

/// POST /auth/register/school-profile - Complete a school profile (step 2).
#[allow(clippy::too_many_lines)]
async fn complete_school_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut email: Option<String> = None;
    let mut input = SchoolProfileInput::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(&e),
        };
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.as_str() {
            "registrationProof" | "endorsementLetter" => {
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
                    .store(DocumentKind::School, &name, &filename, data)
                    .await
                {
                    Ok(doc) => doc,
                    Err(e) => return upload_error(&e),
                };
                if name == "registrationProof" {
                    input.registration_proof = Some(stored.key);
                } else {
                    input.endorsement_letter = Some(stored.key);
                }
            }
            _ => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(e) => return multipart_error(&e),
                };
                if value.is_empty() {
                    continue;
                }
                match name.as_str() {
                    "email" => email = Some(value),
                    "schoolName" => input.school_name = Some(value),
                    "schoolRegNo" => input.school_reg_no = Some(value),
                    "schoolType" => input.school_type = Some(value),
                    "province" => input.province = Some(value),
                    "district" => input.district = Some(value),
                    "address" => input.address = Some(value),
                    "schoolContact" => input.school_contact = Some(value),
                    "schoolEmail" => input.school_email = Some(value),
                    "principalName" => input.principal_name = Some(value),
                    "principalContact" => input.principal_contact = Some(value),
                    "website" => input.website = Some(value),
                    "verifyingAuthority" => input.verifying_authority = Some(value),
                    "authorityContact" => input.authority_contact = Some(value),
                    _ => {}
                }
            }
        }
    }

    let Some(email) = email else {
        return missing_email();
    };

    let repo = AccountRepository::new((*state.db).clone());
    let account = match repo.apply_school_profile(&email, input).await {
        Ok(account) => account,
        Err(e) => return lifecycle_error(&e),
    };

    info!(account_id = %account.id, "School profile completed");
    profile_completed(&state, &account, "School")
}

/// POST /auth/register/donor-profile - Complete a donor profile (step 2).
async fn complete_donor_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut email: Option<String> = None;
    let mut input = DonorProfileInput::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(&e),
        };
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == "identityCertificate" {
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
                .store(DocumentKind::Donor, &name, &filename, data)
                .await
            {
                Ok(doc) => doc,
                Err(e) => return upload_error(&e),
            };
            input.identity_certificate = Some(stored.key);
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
            "email" => email = Some(value),
            "organizationName" => input.organization_name = Some(value),
            "registrationNumber" => input.registration_number = Some(value),
            "organizationType" => input.organization_type = Some(value),
            "contactNumber" => input.contact_number = Some(value),
            "representativeName" => input.representative_name = Some(value),
            "representativePosition" => input.representative_position = Some(value),
            "representativeEmail" => input.representative_email = Some(value),
            "representativePhone" => input.representative_phone = Some(value),
            "referencePartner" => input.reference_partner = Some(value),
            _ => {}
        }
    }

    let Some(email) = email else {
        return missing_email();
    };

    let repo = AccountRepository::new((*state.db).clone());
    let account = match repo.apply_donor_profile(&email, input).await {
        Ok(account) => account,
        Err(e) => return lifecycle_error(&e),
    };

    info!(account_id = %account.id, "Donor profile completed");
    profile_completed(&state, &account, "Donor")
}

/// POST /auth/register/volunteer-profile - Complete a volunteer profile (step 2).
async fn complete_volunteer_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut email: Option<String> = None;
    let mut input = VolunteerProfileInput::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return multipart_error(&e),
        };
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        match name.as_str() {
            "nicFront" | "nicBack" => {
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
                    .store(DocumentKind::Volunteer, &name, &filename, data)
                    .await
                {
                    Ok(doc) => doc,
                    Err(e) => return upload_error(&e),
                };
                if name == "nicFront" {
                    input.nic_front = Some(stored.key);
                } else {
                    input.nic_back = Some(stored.key);
                }
            }
            _ => {
                let value = match field.text().await {
                    Ok(value) => value,
                    Err(e) => return multipart_error(&e),
                };
                if value.is_empty() {
                    continue;
                }
                match name.as_str() {
                    "email" => email = Some(value),
                    "fullName" => input.full_name = Some(value),
                    "contactNumber" => input.contact_number = Some(value),
                    "address" => input.address = Some(value),
                    "vehicleType" => input.vehicle_type = Some(value),
                    "availability" => input.availability = Some(value),
                    "skills" => input.skills = Some(value),
                    _ => {}
                }
            }
        }
    }

    let Some(email) = email else {
        return missing_email();
    };

    let repo = AccountRepository::new((*state.db).clone());
    let account = match repo.apply_volunteer_profile(&email, input).await {
        Ok(account) => account,
        Err(e) => return lifecycle_error(&e),
    };

    info!(account_id = %account.id, "Volunteer profile completed");
    profile_completed(&state, &account, "Volunteer")
}

/// POST /auth/login - Authenticate an account and return a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "VALIDATION_ERROR",
                "message": "Email and password are required"
            })),
        )
            .into_response();
    }

    let repo = AccountRepository::new((*state.db).clone());

    let account = match repo.find_by_email(&payload.email).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for unknown email");
            return invalid_credentials();
        }
        Err(e) => return lifecycle_error(&e),
    };

    // Verify password
    match verify_password(&payload.password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(account_id = %account.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "INTERNAL_ERROR",
                    "message": "Login failed"
                })),
            )
                .into_response();
        }
    }

    // Pending and rejected accounts can log in; the frontend routes them to
    // the completion or rejection screen based on the returned status.
    let account = match repo.record_login(account.id).await {
        Ok(account) => account,
        Err(e) => return lifecycle_error(&e),
    };

    let token = match state
        .jwt_service
        .generate_token(account.id, role_str(&account.role))
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "INTERNAL_ERROR",
                    "message": "Login failed"
                })),
            )
                .into_response();
        }
    };

    info!(account_id = %account.id, "Account logged in");

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Login successful",
            "token": token,
            "user": AccountSummary::project(&account)
        })),
    )
        .into_response()
}

// ============================================================================
// Account Routes
// ============================================================================

/// GET /auth/me and /auth/profile - Return the caller's own account.
async fn me(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.find_by_id(auth.account_id()).await {
        Ok(Some(account)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "user": AccountDetail::from(account)
            })),
        )
            .into_response(),
        Ok(None) => lifecycle_error(&LifecycleError::NotFound {
            kind: EntityKind::Account,
        }),
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /auth/update-profile - Update the caller's profile fields.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    let input = UpdateProfileInput {
        name: payload.name,
        address: payload.address,
        contact_number: payload.contact_number,
        school_name: payload.school_name,
        school_contact: payload.school_contact,
        school_email: payload.school_email,
        principal_name: payload.principal_name,
        principal_contact: payload.principal_contact,
        website: payload.website,
        organization_name: payload.organization_name,
        representative_name: payload.representative_name,
        representative_position: payload.representative_position,
        representative_email: payload.representative_email,
        representative_phone: payload.representative_phone,
        full_name: payload.full_name,
        vehicle_type: payload.vehicle_type,
        availability: payload.availability,
        skills: payload.skills,
    };

    let repo = AccountRepository::new((*state.db).clone());
    match repo.update_profile(auth.account_id(), input).await {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": "Profile updated successfully",
                "user": AccountDetail::from(account)
            })),
        )
            .into_response(),
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /auth/change-password - Change the caller's password.
async fn change_password(
    State(state): State<AppState>,
    auth: AuthAccount,
    Json(payload): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if payload.current_password.is_empty() || payload.new_password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "VALIDATION_ERROR",
                "message": "Please provide current and new password"
            })),
        )
            .into_response();
    }
    if payload.new_password.len() < 6 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "VALIDATION_ERROR",
                "message": "Password must be at least 6 characters"
            })),
        )
            .into_response();
    }

    let repo = AccountRepository::new((*state.db).clone());
    let account = match repo.find_by_id(auth.account_id()).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            return lifecycle_error(&LifecycleError::NotFound {
                kind: EntityKind::Account,
            });
        }
        Err(e) => return lifecycle_error(&e),
    };

    match verify_password(&payload.current_password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "success": false,
                    "error": "INVALID_CREDENTIALS",
                    "message": "Current password is incorrect"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return password_change_failed();
        }
    }

    let password_hash = match hash_password(&payload.new_password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return password_change_failed();
        }
    };

    match repo.change_password(account.id, &password_hash).await {
        Ok(_) => {
            info!(account_id = %account.id, "Password changed");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Password changed successfully"
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// POST /auth/logout - Acknowledge a logout.
///
/// Tokens are stateless; the client discards its copy.
async fn logout(auth: AuthAccount) -> impl IntoResponse {
    info!(account_id = %auth.account_id(), "Account logged out");
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Logged out successfully"
        })),
    )
        .into_response()
}

/// GET /auth/volunteers - List verified volunteers (public directory).
async fn list_volunteers(State(state): State<AppState>) -> impl IntoResponse {
    let repo = AccountRepository::new((*state.db).clone());

    match repo.list_verified_volunteers().await {
        Ok(accounts) => {
            let volunteers: Vec<VolunteerView> =
                accounts.into_iter().map(VolunteerView::from).collect();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "count": volunteers.len(),
                    "volunteers": volunteers
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

/// GET /auth/pending-users - List accounts awaiting review (admin).
async fn pending_accounts(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.list_pending().await {
        Ok(accounts) => account_list(accounts),
        Err(e) => lifecycle_error(&e),
    }
}

/// GET /auth/all-users - List all non-admin accounts (admin).
async fn all_accounts(State(state): State<AppState>, auth: AuthAccount) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.list_non_admin().await {
        Ok(accounts) => account_list(accounts),
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /auth/approve-user/{id} - Approve a pending or rejected account (admin).
async fn approve_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.approve(id).await {
        Ok(account) => {
            info!(account_id = %account.id, admin_id = %auth.account_id(), "Account approved");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "User approved successfully",
                    "user": AccountDetail::from(account)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// PUT /auth/reject-user/{id} - Reject an account with a reason (admin).
async fn reject_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
    Json(payload): Json<RejectRequest>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.reject(id, payload.reason.unwrap_or_default()).await {
        Ok(account) => {
            info!(account_id = %account.id, admin_id = %auth.account_id(), "Account rejected");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "User rejected",
                    "user": AccountDetail::from(account)
                })),
            )
                .into_response()
        }
        Err(e) => lifecycle_error(&e),
    }
}

/// DELETE /auth/delete-user/{id} - Delete an account and its submissions (admin).
async fn delete_account(
    State(state): State<AppState>,
    auth: AuthAccount,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(e) = AccessGuard::require_admin(auth.role()) {
        return lifecycle_error(&e);
    }

    let repo = AccountRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => {
            info!(account_id = %id, admin_id = %auth.account_id(), "Account deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "User deleted successfully"
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

/// Validates a basic registration payload, returning the parsed role.
fn validate_registration(payload: &RegisterRequest) -> Result<AccountRole, &'static str> {
    if payload.name.trim().is_empty() {
        return Err("Name is required");
    }
    if !payload.email.contains('@') {
        return Err("Valid email is required");
    }
    if payload.password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    match AccountRole::parse(&payload.role) {
        Some(role) if role.self_registrable() => Ok(role),
        _ => Err("Role must be school, donor or volunteer"),
    }
}

/// Builds the shared profile completion response with a fresh token.
fn profile_completed(
    state: &AppState,
    account: &accounts::Model,
    label: &str,
) -> Response {
    let token = match state
        .jwt_service
        .generate_token(account.id, role_str(&account.role))
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "INTERNAL_ERROR",
                    "message": "Profile completion failed"
                })),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": format!(
                "{label} profile completed successfully. Awaiting admin verification."
            ),
            "token": token,
            "user": AccountSummary::project(account)
        })),
    )
        .into_response()
}

/// Builds the `{count, users}` list response used by the admin lists.
fn account_list(rows: Vec<accounts::Model>) -> Response {
    let users: Vec<AccountDetail> = rows.into_iter().map(AccountDetail::from).collect();
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "count": users.len(),
            "users": users
        })),
    )
        .into_response()
}

fn invalid_credentials() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "success": false,
            "error": "INVALID_CREDENTIALS",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

fn missing_email() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "error": "VALIDATION_ERROR",
            "message": "Email is required"
        })),
    )
        .into_response()
}

fn registration_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "INTERNAL_ERROR",
            "message": "Registration failed"
        })),
    )
        .into_response()
}

fn password_change_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": "INTERNAL_ERROR",
            "message": "Password change failed"
        })),
    )
        .into_response()
}

/// Converts the stored role into its token string.
fn role_str(role: &DbAccountRole) -> &'static str {
    match role {
        DbAccountRole::Admin => "admin",
        DbAccountRole::School => "school",
        DbAccountRole::Donor => "donor",
        DbAccountRole::Volunteer => "volunteer",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn register_payload(name: &str, email: &str, password: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        }
    }

    #[rstest]
    #[case("school")]
    #[case("donor")]
    #[case("volunteer")]
    fn test_validate_registration_accepts_public_roles(#[case] role: &str) {
        let payload = register_payload("Amara", "amara@example.com", "secret123", role);
        assert_eq!(
            validate_registration(&payload),
            Ok(AccountRole::parse(role).unwrap())
        );
    }

    #[test]
    fn test_validate_registration_rejects_admin() {
        let payload = register_payload("Amara", "amara@example.com", "secret123", "admin");
        assert!(validate_registration(&payload).is_err());
    }

    #[rstest]
    #[case("", "amara@example.com", "secret123", "donor")]
    #[case("   ", "amara@example.com", "secret123", "donor")]
    #[case("Amara", "not-an-email", "secret123", "donor")]
    #[case("Amara", "amara@example.com", "short", "donor")]
    #[case("Amara", "amara@example.com", "secret123", "teacher")]
    fn test_validate_registration_rejects_bad_input(
        #[case] name: &str,
        #[case] email: &str,
        #[case] password: &str,
        #[case] role: &str,
    ) {
        let payload = register_payload(name, email, password, role);
        assert!(validate_registration(&payload).is_err());
    }

    #[test]
    fn test_role_str_round_trip() {
        assert_eq!(role_str(&DbAccountRole::Admin), "admin");
        assert_eq!(role_str(&DbAccountRole::School), "school");
        assert_eq!(role_str(&DbAccountRole::Donor), "donor");
        assert_eq!(role_str(&DbAccountRole::Volunteer), "volunteer");
    }
}
