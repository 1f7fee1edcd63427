//! Background scheduler for the daily pipeline run.
//!
//! Disabled by default — the expected deployment triggers runs through
//! `/api/v1/run` from an external cron. When enabled, ticks are
//! fire-and-forget like the HTTP trigger; an overlapping manual run is
//! safe because every store write is an atomic keyed upsert.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info};

use crate::config::Config;
use crate::main_lib::AppState;

/// Run interval: 24 hours.
const RUN_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Initial delay before the first run (60 seconds to let the server
/// fully start).
const INITIAL_DELAY_SECS: u64 = 60;

pub fn spawn_scheduler(state: Arc<AppState>, config: &Config) {
    if !config.schedule_enabled {
        return;
    }

    info!(
        "Scheduler enabled: running pipeline for {} every {}s",
        state.pipeline.symbol(),
        RUN_INTERVAL_SECS
    );

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;
        let mut ticker = interval(Duration::from_secs(RUN_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            match state.pipeline.run().await {
                Ok(outcome) => info!("Scheduled pipeline run finished: {:?}", outcome),
                Err(e) => error!("Scheduled pipeline run failed: {}", e),
            }
        }
    });
}
