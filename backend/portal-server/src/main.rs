use portal_config::{Config, ConfigSource};
use portal_server::{AppState, bootstrap, build_router, logger, scheduler};

use std::error::Error;
use std::time::Duration;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    let config_dir = Config::config_dir()?;

    let log_file_path = if let Some(ref filename) = config.logging.file {
        let log_dir = config_dir.join(&config.logging.dir);
        std::fs::create_dir_all(&log_dir)?;
        Some(log_dir.join(filename))
    } else {
        None
    };

    // Initialize logger (before any other logging)
    logger::initialize(config.logging.level, log_file_path, config.logging.colored)?;

    info!("Starting portal-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let state = AppState::new(
        ConfigSource::Environment,
        config_dir,
        config.login_rate_limit.clone(),
    )?;

    match bootstrap::ensure_bootstrap_admin(&state).await {
        Ok(true) => info!("Bootstrap admin created"),
        Ok(false) => {}
        Err(e) => warn!("Bootstrap admin not created: {e}"),
    }

    if config.catalog.sync_interval_secs > 0 {
        scheduler::spawn_catalog_sync(
            state.clone(),
            Duration::from_secs(config.catalog.sync_interval_secs),
        );
    }
    scheduler::spawn_limiter_prune(state.clone());

    let app = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
                Err(e) => error!("Failed to listen for SIGINT: {e}"),
            }
        })
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}
