//! Background jobs started alongside the HTTP server

use crate::AppState;

use portal_catalog::{CatalogClient, sync_catalog};

use std::time::Duration;

use log::{error, info};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

const LIMITER_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// Run a catalog sync every `period`. The first run happens after one period.
pub fn spawn_catalog_sync(state: AppState, period: Duration) -> JoinHandle<()> {
    info!(
        "Scheduled catalog sync every {}",
        humantime::format_duration(period)
    );

    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match run_catalog_sync(&state).await {
                Ok(summary) => info!(
                    "Scheduled catalog sync finished: {} categories, {} agents",
                    summary.categories, summary.agents
                ),
                Err(e) => error!("Scheduled catalog sync failed: {e}"),
            }
        }
    })
}

async fn run_catalog_sync(
    state: &AppState,
) -> Result<portal_catalog::CatalogSyncSummary, portal_catalog::CatalogError> {
    let config = state.config.current()?;
    let client = CatalogClient::from_config(&config.catalog)?;
    sync_catalog(&client, &state.catalog_cache(&config)).await
}

/// Drop idle per-username entries from the login limiter.
pub fn spawn_limiter_prune(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(LIMITER_PRUNE_INTERVAL);
        loop {
            ticker.tick().await;
            state.login_limiter.prune();
        }
    })
}
