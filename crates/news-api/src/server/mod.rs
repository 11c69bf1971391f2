//! Server setup and initialization
//!
//! Provides the application builder and server runner; spawns the periodic
//! lifecycle and maintenance jobs next to the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use news_cache::{Publisher, RedisPool, RedisPoolConfig};
use news_common::{AppConfig, AppError};
use news_core::SnowflakeGenerator;
use news_db::{
    create_pool, PgChannelRepository, PgContentRepository, PgInteractionRepository,
};
use news_service::{spawn_background_jobs, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router().merge(health_routes());
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let db_config = news_db::DatabaseConfig::from_app_config(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    // Create Redis pool
    info!("Connecting to Redis...");
    let redis_config = RedisPoolConfig::from(&config.redis);
    let redis_pool = RedisPool::new(redis_config).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis connection established");

    // Create Snowflake generator
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    // Create repositories and publisher
    let content_repo = Arc::new(PgContentRepository::new(pool.clone()));
    let channel_repo = Arc::new(PgChannelRepository::new(pool.clone()));
    let interaction_repo = Arc::new(PgInteractionRepository::new(pool));
    let publisher = Arc::new(Publisher::new(redis_pool));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .content_repo(content_repo)
        .channel_repo(channel_repo)
        .interaction_repo(interaction_repo)
        .publisher(publisher)
        .snowflake_generator(snowflake_generator)
        .lifecycle(config.lifecycle.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.api.port));

    // Create app state
    let state = create_app_state(config).await?;

    // Spawn the periodic lifecycle sweep and maintenance pass
    let jobs = spawn_background_jobs(state.service_context().clone());

    // Build and run the HTTP server
    let app = create_app(state);
    let result = run_server(app, addr).await;

    jobs.abort();
    result
}
