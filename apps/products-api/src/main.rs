//! Products API - REST server

use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod auth;
mod config;
mod entity;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics()?;

    info!(
        app = config.app.name,
        version = config.app.version,
        "Connecting to PostgreSQL"
    );

    let db = connect_with_retry(config.database.clone(), None).await?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("RUN_MIGRATIONS=false, skipping migrations");
    }

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build REST router
    let router = create_router::<openapi::ApiDoc>(api::routes(&state))?;
    let app = router.merge(api::health::router(state.clone()));

    info!("Starting Products API on {}", config.server.address());

    let db = state.db.clone();
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing PostgreSQL pool");
        if let Err(e) = db.close().await {
            tracing::warn!(error = %e, "Failed to close PostgreSQL pool");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Products API shutdown complete");
    Ok(())
}
