//! Authentication middleware for protected routes.

use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::convert::Infallible;

use crate::AppState;
use edulink_core::lifecycle::AccountRole;
use edulink_shared::Claims;

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Authentication middleware that validates JWT tokens.
///
/// This middleware:
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the JWT service
/// 3. Stores the claims in request extensions for handlers to access
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let Some(token) = auth_header.and_then(extract_bearer_token) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "success": false,
                "error": "UNAUTHORIZED",
                "message": "Authorization header with Bearer token is required"
            })),
        )
            .into_response();
    };

    // Validate token
    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            // Store claims in request extensions
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            let (error, message) = match e {
                edulink_shared::JwtError::Expired => ("TOKEN_EXPIRED", "Token has expired"),
                _ => ("UNAUTHORIZED", "Invalid or malformed token"),
            };

            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "success": false, "error": error, "message": message })),
            )
                .into_response()
        }
    }
}

/// Extractor for the authenticated account.
///
/// Use this in handlers behind `auth_middleware` to get the caller's
/// identity and role:
///
/// ```ignore
/// async fn handler(auth: AuthAccount) -> impl IntoResponse {
///     let account_id = auth.account_id();
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthAccount {
    claims: Claims,
    role: AccountRole,
}

impl AuthAccount {
    /// Returns the account ID from the claims.
    #[must_use]
    pub fn account_id(&self) -> uuid::Uuid {
        self.claims.account_id()
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> AccountRole {
        self.role
    }

    /// Returns the inner claims.
    #[must_use]
    pub const fn claims(&self) -> &Claims {
        &self.claims
    }
}

impl<S> FromRequestParts<S> for AuthAccount
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let unauthorized = || {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "success": false,
                    "error": "UNAUTHORIZED",
                    "message": "Authentication required"
                })),
            )
        };

        let claims = parts
            .extensions
            .get::<Claims>()
            .cloned()
            .ok_or_else(unauthorized)?;
        let role = AccountRole::parse(&claims.role).ok_or_else(unauthorized)?;

        Ok(Self { claims, role })
    }
}

/// Extractor for routes that serve both anonymous and authenticated callers.
///
/// Public detail routes use this to widen visibility for owners and admins
/// without requiring a token. A missing or invalid token yields `None`
/// rather than a rejection.
#[derive(Debug, Clone)]
pub struct OptionalAuthAccount(pub Option<AuthAccount>);

impl FromRequestParts<AppState> for OptionalAuthAccount {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Prefer claims already validated by the middleware.
        let claims = match parts.extensions.get::<Claims>() {
            Some(claims) => Some(claims.clone()),
            None => parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(extract_bearer_token)
                .and_then(|token| state.jwt_service.validate_token(token).ok()),
        };

        let account = claims.and_then(|claims| {
            let role = AccountRole::parse(&claims.role)?;
            Some(AuthAccount { claims, role })
        });

        Ok(Self(account))
    }
}
