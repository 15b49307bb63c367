//! API route definitions.

use axum::{
    Json, Router, extract::multipart::MultipartError, http::StatusCode, middleware,
    response::IntoResponse, response::Response,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{AppState, middleware::auth::auth_middleware};
use edulink_core::lifecycle::LifecycleError;
use edulink_core::storage::StorageError;

pub mod auth;
pub mod donations;
pub mod files;
pub mod health;
pub mod requests;

/// Creates the API router with public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(donations::protected_routes())
        .merge(requests::protected_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(files::routes())
        .merge(auth::routes())
        .merge(donations::routes())
        .merge(requests::routes())
        .merge(protected_routes)
}

/// Request body for rejecting an account, donation or supply request.
///
/// The reason is required; a missing or blank reason is refused by the
/// lifecycle engine before anything is written.
#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    /// Why the entity was rejected.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Maps a lifecycle error onto the shared response envelope.
///
/// Database errors are logged and collapsed into a generic 500 so driver
/// details never leak to callers. Every other variant carries its own
/// status code and stable error code.
pub(crate) fn lifecycle_error(err: &LifecycleError) -> Response {
    if let LifecycleError::Database(detail) = err {
        error!("Database error: {detail}");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "error": "DATABASE_ERROR",
                "message": "An unexpected error occurred"
            })),
        )
            .into_response();
    }

    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
    (
        status,
        Json(json!({
            "success": false,
            "error": err.error_code(),
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Maps a document upload failure onto the shared response envelope.
///
/// Validation failures report what the caller got wrong; backend failures
/// are logged and collapsed into a generic 500.
pub(crate) fn upload_error(err: &StorageError) -> Response {
    match err {
        StorageError::FileTooLarge { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "FILE_TOO_LARGE",
                "message": err.to_string()
            })),
        )
            .into_response(),
        StorageError::ExtensionNotAllowed { .. } | StorageError::MissingExtension { .. } => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "FILE_TYPE_NOT_ALLOWED",
                "message": err.to_string()
            })),
        )
            .into_response(),
        StorageError::NotFound { .. } | StorageError::Configuration(_) | StorageError::Operation(_) => {
            error!("Storage error during upload: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": "UPLOAD_FAILED",
                    "message": "File upload failed"
                })),
            )
                .into_response()
        }
    }
}

/// Maps a malformed multipart body onto the shared response envelope.
pub(crate) fn multipart_error(err: &MultipartError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "error": "INVALID_MULTIPART",
            "message": err.to_string()
        })),
    )
        .into_response()
}

/// Router wiring tests that never reach the database.
///
/// These requests are resolved by the middleware and guards before any
/// repository call, so a disconnected backend is enough.
#[cfg(test)]
mod integration_tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, header::AUTHORIZATION};
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::create_router;
    use edulink_core::storage::{StorageConfig, StorageProvider, StorageService};
    use edulink_shared::{JwtConfig, JwtService};

    fn test_state() -> AppState {
        let jwt_service = JwtService::new(JwtConfig {
            secret: "router-test-secret".to_string(),
            token_expiry_secs: 3600,
        });
        let storage = StorageService::from_config(StorageConfig::new(
            StorageProvider::local_fs("./test-uploads"),
        ))
        .expect("should create storage");

        AppState {
            db: Arc::new(DatabaseConnection::Disconnected),
            jwt_service: Arc::new(jwt_service),
            storage: Arc::new(storage),
        }
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("should read body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("should parse body")
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_router(test_state(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let app = create_router(test_state(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_protected_route_rejects_garbage_token() {
        let app = create_router(test_state(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/me")
                    .header(AUTHORIZATION, "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_submission_route_requires_token() {
        let app = create_router(test_state(), None);

        // GET /donations is public; POST on the same path is not.
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/donations")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_route_refuses_non_admin() {
        let state = test_state();
        let token = state
            .jwt_service
            .generate_token(uuid::Uuid::new_v4(), "donor")
            .expect("should generate token");
        let app = create_router(state, None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/auth/pending-users")
                    .header(AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["error"], "ADMIN_REQUIRED");
    }

    #[tokio::test]
    async fn test_missing_file_returns_404() {
        let app = create_router(test_state(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/files/donation/missing-image.png")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "FILE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_id_segment_rejected() {
        let app = create_router(test_state(), None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/donations/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
