// Main entry point for API server

use std::sync::Arc;

use anyhow::{Context, Result};
use jobboard_core::{
    domains::auth::JwtService,
    kernel::{start_scheduler, BaseJobSource, JSearchClient, ServerDeps},
    server::{build_app, AppState},
    Config,
};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobboard_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Job Board API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    let job_source: Arc<dyn BaseJobSource> = Arc::new(
        JSearchClient::new(config.jsearch.clone()).context("Failed to create JSearch client")?,
    );
    let deps = ServerDeps::postgres(pool, job_source);

    // Keep the scheduler handle alive for the lifetime of the server
    let _scheduler = if config.ingest.scheduler_enabled {
        Some(
            start_scheduler(deps.clone(), &config.ingest)
                .await
                .context("Failed to start scheduler")?,
        )
    } else {
        tracing::warn!("INGEST_SCHEDULER_ENABLED=false; hourly ingestion is off");
        None
    };

    let app = build_app(AppState {
        deps,
        jwt_service: Arc::new(JwtService::new(
            &config.auth.jwt_secret,
            config.auth.issuer.clone(),
            config.auth.audience.clone(),
        )),
        client_url: config.client_url.clone(),
        ingest_trigger_token: config.ingest.trigger_token.clone(),
    });

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
