//! Stockbook API Server
//!
//! Main entry point for the Stockbook inventory service.

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockbook_api::{AppState, create_router};
use stockbook_db::{connect, migration::Migrator};
use stockbook_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockbook=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database)
        .await
        .context("failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    if config.database.auto_migrate {
        Migrator::up(&db, None).await.context("failed to run migrations")?;
        info!("Migrations applied");
    }

    info!(
        max_attempts = config.inventory.max_attempts,
        low_stock_threshold = config.inventory.low_stock_threshold,
        "Inventory settings loaded"
    );

    // Create router
    let app = create_router(AppState::new(db, config.inventory.clone()));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
