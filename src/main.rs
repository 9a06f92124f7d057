//! Library Server - Library Management Web Application

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_server::{
    api,
    config::{AppConfig, SessionBackend},
    repository::Repository,
    services::Services,
    session::{spawn_expiry_sweep, MemorySessionStore, RedisSessionStore},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("library_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Library Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let backend = config.session.backend;
    let sweep_interval = Duration::from_secs(config.session.sweep_interval_seconds);
    let redis_url = config.redis.url.clone();

    let state = AppState {
        services: Arc::new(Services::new(Repository::new(pool))),
        config: Arc::new(config),
    };

    let app = match backend {
        SessionBackend::Memory => {
            let store = MemorySessionStore::new();
            spawn_expiry_sweep(store.clone(), sweep_interval);
            api::create_router(state, store)
        }
        SessionBackend::Redis => {
            let store = RedisSessionStore::new(&redis_url)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Connected to Redis session store");
            api::create_router(state, store)
        }
    };

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
