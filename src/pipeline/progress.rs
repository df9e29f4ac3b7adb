//! Progress logging.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;
use tokio_util::sync::CancellationToken;

use crate::config::LOGGING_INTERVAL;
use crate::error_handling::BatchStats;

/// Logs how many addresses are done and at what rate.
pub fn log_progress(start_time: Instant, stats: &BatchStats, total: usize) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let completed = stats.total();
    let rate = if elapsed_secs > 0.0 {
        completed as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Resolved {}/{} addresses in {:.2} seconds (~{:.2} addresses/sec)",
        completed, total, elapsed_secs, rate
    );
}

/// Spawns a task logging progress every [`LOGGING_INTERVAL`] until `shutdown`
/// fires.
pub(crate) fn spawn_progress_logger(
    start_time: Instant,
    stats: Arc<BatchStats>,
    total: usize,
    shutdown: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(LOGGING_INTERVAL));
        // First tick completes immediately.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => log_progress(start_time, &stats, total),
                _ = shutdown.cancelled() => break,
            }
        }
    })
}
