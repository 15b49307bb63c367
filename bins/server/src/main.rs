//! EduLink API Server
//!
//! Main entry point for the EduLink backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edulink_api::{AppState, create_router};
use edulink_core::storage::{StorageConfig, StorageProvider, StorageService};
use edulink_db::connect;
use edulink_shared::config::StorageSettings;
use edulink_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edulink=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create JWT service
    let jwt_config = JwtConfig {
        secret: config.jwt.secret.clone(),
        #[allow(clippy::cast_possible_wrap)]
        token_expiry_secs: config.jwt.token_expiry_secs as i64,
    };
    let jwt_service = JwtService::new(jwt_config);

    // Create document storage
    let storage = storage_service(&config.storage)?;
    info!(
        provider = storage.provider_name(),
        max_file_size = storage.max_file_size(),
        "Document storage configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(jwt_service),
        storage: Arc::new(storage),
    };

    // Create router
    let app = create_router(state, config.server.cors_origin.as_deref());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the document storage service from the configured provider.
fn storage_service(settings: &StorageSettings) -> anyhow::Result<StorageService> {
    let provider = match settings.provider.as_str() {
        "s3" => StorageProvider::s3(
            required(&settings.endpoint, "storage.endpoint")?,
            required(&settings.bucket, "storage.bucket")?,
            required(&settings.access_key_id, "storage.access_key_id")?,
            required(&settings.secret_access_key, "storage.secret_access_key")?,
            settings.region.clone().unwrap_or_else(|| "auto".to_string()),
        ),
        "azblob" => StorageProvider::azure_blob(
            required(&settings.account, "storage.account")?,
            required(&settings.access_key, "storage.access_key")?,
            required(&settings.container, "storage.container")?,
        ),
        "local" => StorageProvider::local_fs(settings.root.clone()),
        other => anyhow::bail!("Unknown storage provider: {other}"),
    };

    let storage_config =
        StorageConfig::new(provider).with_max_file_size(settings.max_upload_size);
    StorageService::from_config(storage_config).context("Failed to initialize document storage")
}

/// Returns the setting value or an error naming the missing key.
fn required(value: &Option<String>, key: &str) -> anyhow::Result<String> {
    value
        .clone()
        .with_context(|| format!("{key} is required for the configured storage provider"))
}
