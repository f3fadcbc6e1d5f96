//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use archive_common::{AppConfig, AppError, JwtService, UploadStorage};
use archive_core::SnowflakeGenerator;
use archive_db::{
    create_pool, PgAccessRequestRepository, PgChannelRepository, PgDownloadRepository,
    PgMaterialRepository, PgMembershipRepository, PgUserRepository, PgVerificationRepository,
    PgWarningRepository,
};
use archive_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health routes are mounted outside the rate-limited stack.
pub fn create_app(state: AppState) -> Router {
    let api = apply_middleware(create_router());
    let health = health_routes();
    api.merge(health).with_state(state)
}

/// Build the application with rate limiting and configured CORS
pub fn create_app_with_config(state: AppState) -> Router {
    let config = state.config().clone();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = health_routes();
    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = archive_db::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..Default::default()
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create JWT service
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.token_expiry,
    ));

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Upload storage
    let storage = UploadStorage::new(&config.storage.upload_dir);

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let warning_repo = Arc::new(PgWarningRepository::new(pool.clone()));
    let verification_repo = Arc::new(PgVerificationRepository::new(pool.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let membership_repo = Arc::new(PgMembershipRepository::new(pool.clone()));
    let access_request_repo = Arc::new(PgAccessRequestRepository::new(pool.clone()));
    let material_repo = Arc::new(PgMaterialRepository::new(pool.clone()));
    let download_repo = Arc::new(PgDownloadRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(user_repo)
        .warning_repo(warning_repo)
        .verification_repo(verification_repo)
        .channel_repo(channel_repo)
        .membership_repo(membership_repo)
        .access_request_repo(access_request_repo)
        .material_repo(material_repo)
        .download_repo(download_repo)
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .storage(storage)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Build application (rate limiting + CORS from config)
    let app = create_app_with_config(state);

    // Run server
    run_server(app, addr).await
}
