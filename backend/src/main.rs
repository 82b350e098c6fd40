//! Nutrition Tracker Backend
//!
//! Session-scoped calorie and macro tracking with AI-assisted food logging.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Orchestration over the shared domain core
//! - Repositories: Typed session documents
//! - Store: Redis, or in-memory when Redis is unreachable

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use nutrition_tracker_backend::{
    ai, config,
    routes,
    state::AppState,
    store::{KeyValueStore, MemoryStore, RedisStore},
};
use nutrition_tracker_shared::{RecipeCatalog, SystemClock};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Nutrition Tracker Backend"
    );

    // Validate production configuration
    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let clock = SystemClock::from_offset_minutes(config.clock.utc_offset_minutes)
        .context("clock.utc_offset_minutes must be within ±24 hours")?;
    let catalog = load_catalog(config.catalog.path.as_deref())?;
    info!(recipes = catalog.len(), "Recipe catalog loaded");

    let store = connect_store(&config.redis.url).await;
    let ai = ai::from_config(&config.ai);

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    // Create application state
    let state = AppState::new(store, ai, Arc::new(clock), catalog, config.clone())
        .with_metrics(metrics);

    // Build application
    let app = routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Connect to Redis with graceful fallback
///
/// Falls back to an in-memory store if Redis is unavailable, so sessions
/// last only as long as the process.
async fn connect_store(url: &str) -> Arc<dyn KeyValueStore> {
    match RedisStore::connect(url).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("{:#}. Session data will be kept in memory only.", e);
            Arc::new(MemoryStore::new())
        }
    }
}

/// Built-in catalog unless a replacement file is configured
fn load_catalog(path: Option<&str>) -> Result<RecipeCatalog> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read recipe catalog {}", path))?;
            RecipeCatalog::from_json(&json)
                .with_context(|| format!("Invalid recipe catalog {}", path))
        }
        None => RecipeCatalog::builtin().context("Built-in recipe catalog is invalid"),
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "nutrition_tracker_backend=info,tower_http=info".into()
        } else {
            "nutrition_tracker_backend=debug,tower_http=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.ai.enabled && config.ai.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
        errors.push("AI is enabled but NT__AI__API_KEY is not set");
    }

    if config.redis.url.contains("localhost") || config.redis.url.contains("127.0.0.1") {
        warn!("Redis URL contains localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
