//! Batch worker loop.

use std::any::Any;
use std::collections::VecDeque;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::FailMode;
use crate::error_handling::{BatchStats, WhoisError};
use crate::whois::{Dialer, Resolver};

use super::LookupOutcome;

/// Shared input queue; every address is handed to exactly one worker.
pub(crate) type WorkQueue = Arc<Mutex<VecDeque<String>>>;

/// Everything one worker needs.
pub(crate) struct WorkerParams<D> {
    pub id: usize,
    pub resolver: Arc<Resolver<D>>,
    pub queue: WorkQueue,
    pub results: mpsc::Sender<LookupOutcome>,
    pub cancel: CancellationToken,
    pub fail_mode: FailMode,
    pub stats: Arc<BatchStats>,
}

fn next_address(queue: &WorkQueue) -> Option<String> {
    queue
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Resolves addresses from the queue until it is empty.
///
/// Every address taken produces exactly one outcome, cancelled and panicked
/// lookups included. In fail-fast mode the first address that fails outright trips
/// the shared token.
pub(crate) async fn run_worker<D: Dialer>(params: WorkerParams<D>) {
    let WorkerParams {
        id,
        resolver,
        queue,
        results,
        cancel,
        fail_mode,
        stats,
    } = params;

    while let Some(address) = next_address(&queue) {
        let result = match AssertUnwindSafe(resolver.resolve(&cancel, &address))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Worker {} panicked resolving {}: {}", id, address, message);
                Err(WhoisError::Panicked { message })
            }
        };
        stats.record(&result);

        match &result {
            Ok(record) => debug!(
                "Worker {} resolved {} via {} hop(s)",
                id,
                address,
                record.depth()
            ),
            Err(WhoisError::Cancelled { .. }) => {
                debug!("Worker {} skipped {}: cancelled", id, address)
            }
            Err(e) => {
                warn!("Failed to resolve {}: {}", address, e);
                if fail_mode == FailMode::FailFast && !cancel.is_cancelled() {
                    info!("Cancelling remaining lookups after failure on {}", address);
                    cancel.cancel();
                }
            }
        }

        if results.send(LookupOutcome { address, result }).await.is_err() {
            debug!("Worker {} stopping: result receiver dropped", id);
            break;
        }
    }
}
