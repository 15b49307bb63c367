//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Authentication middleware
//! - Role-keyed view projections
//! - Response types

pub mod middleware;
pub mod routes;
pub mod views;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::Router;
use edulink_core::storage::StorageService;
use edulink_shared::JwtService;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Headroom added to the storage limit to cover multipart framing.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Storage service for uploaded documents.
    pub storage: Arc<StorageService>,
}

/// Creates the main application router.
///
/// When `cors_origin` is `None` the API accepts requests from any origin,
/// which is the development default. Production deployments should pin the
/// frontend origin via configuration.
pub fn create_router(state: AppState, cors_origin: Option<&str>) -> Router {
    let body_limit = usize::try_from(state.storage.max_file_size())
        .unwrap_or(usize::MAX - MULTIPART_OVERHEAD)
        + MULTIPART_OVERHEAD;

    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origin))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    match origin.and_then(|o| o.parse::<HeaderValue>().ok()) {
        Some(value) => layer.allow_origin(value),
        None => layer.allow_origin(Any),
    }
}
