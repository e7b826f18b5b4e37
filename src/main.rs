use anyhow::Context;
use caredesk::api::{self, app_state::AppState};
use caredesk::client::BackendClient;
use caredesk::config::{ConfigLoader, StorageBackend};
use caredesk::models::profile::Profile;
use caredesk::observability::{ObservabilityState, create_observability_router, init_tracing};
use caredesk::security::auth::JwtTokenGenerator;
use caredesk::storage::{MemoryStore, StorageFactory, Store};
use std::sync::Arc;
use axum::ServiceExt;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::{info, warn};

/// 开发环境预置的管理员
const DEV_ADMIN_ID: &str = "dev-admin";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    ConfigLoader::validate(&config).context("invalid configuration")?;

    let _log_guard = init_tracing(&config.logging);
    info!(
        "Starting {} ({} environment)...",
        config.app_name, config.environment
    );

    let store = if config.database.backend == StorageBackend::Memory && !config.is_production() {
        // 进程内存储预置一个管理员，便于本地调试后台
        let memory = Arc::new(MemoryStore::new());
        memory.seed_profile(
            Profile::new(DEV_ADMIN_ID).with_preference("is_admin", serde_json::Value::Bool(true)),
        );
        let token = JwtTokenGenerator::from_config(&config.auth, 24 * 3600)
            .generate_token(DEV_ADMIN_ID, None)?;
        info!("Development admin token: {}", token);
        Store::memory(memory)
    } else {
        StorageFactory::create(&config.database)
            .await
            .context("failed to initialise store")?
    };
    info!("Store initialized: {}", store.backend_name());

    let backend = BackendClient::from_config(&config.backend)?;
    if backend.is_configured() {
        let health = backend.check_api_health().await;
        if health.status == "healthy" {
            info!("Backend API reachable: {}", health.message);
        } else {
            warn!("Backend API unhealthy: {}", health.message);
        }
    }

    let app_state = AppState::from_config(store.clone(), &config);
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        store,
        env!("CARGO_PKG_VERSION").to_string(),
    ));
    let api_router = api::create_router(app_state, &config.server);
    let router = create_observability_router(observability_state).merge(api_router);
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);
    info!("API router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
