//! Concurrent resolution of many addresses.
//!
//! A fixed pool of workers drains a shared queue of addresses and publishes
//! one [`LookupOutcome`] per address on a results channel, in completion
//! order. A single consumer reads the channel while the workers run.

mod progress;
mod worker;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::PipelineConfig;
use crate::error_handling::{BatchStats, ConfigError, WhoisError};
use crate::whois::{Dialer, Record, Resolver};

pub use progress::log_progress;
use worker::{run_worker, WorkerParams};

/// Result of resolving one address, tagged with that address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    pub address: String,
    pub result: Result<Record, WhoisError>,
}

impl LookupOutcome {
    /// The record, if any hop succeeded.
    pub fn record(&self) -> Option<&Record> {
        self.result.as_ref().ok()
    }
}

/// Summary of a finished batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Outcomes produced (one per address taken from the queue)
    pub total: usize,
    /// Lookups that reached an authoritative server
    pub resolved: usize,
    /// Lookups that returned a record with `recurse_error` set
    pub partial: usize,
    /// Lookups without any record
    pub failed: usize,
    /// Failed lookups that never dialed because the batch was cancelled.
    /// Partial records cut short by cancellation count as `partial` only.
    pub cancelled: usize,
    /// Whether the batch token fired: fail-fast abort, [`BatchHandle::cancel`]
    /// or the pipeline's parent token
    pub aborted: bool,
    pub elapsed: Duration,
}

impl BatchReport {
    fn from_stats(stats: &BatchStats, aborted: bool, elapsed: Duration) -> Self {
        BatchReport {
            total: stats.total(),
            resolved: stats.resolved(),
            partial: stats.partial(),
            failed: stats.failed(),
            cancelled: stats.cancelled(),
            aborted,
            elapsed,
        }
    }
}

/// Resolves batches of addresses with bounded parallelism.
pub struct BatchPipeline<D> {
    resolver: Arc<Resolver<D>>,
    config: PipelineConfig,
    cancel: CancellationToken,
}

impl<D: Dialer> BatchPipeline<D> {
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(resolver: Arc<Resolver<D>>, config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            resolver,
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Uses `cancel` as the parent of every batch token instead of a private
    /// one, so that callers (e.g. a Ctrl-C handler) can stop running batches.
    /// Once it fires, later batches are cancelled from the start.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Parent token of every batch started by this pipeline.
    ///
    /// Each batch runs under its own child token: a fail-fast abort or
    /// [`BatchHandle::cancel`] stops that batch only.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Starts resolving `addresses` and returns immediately.
    ///
    /// `min(concurrency, addresses.len())` workers are spawned. Outcomes arrive
    /// on the returned handle as they complete; the channel holds every
    /// outcome, so workers never wait on a slow consumer.
    pub fn resolve_all(&self, addresses: Vec<String>) -> BatchHandle {
        let total = addresses.len();
        let workers = self.config.concurrency.min(total);
        let (tx, rx) = mpsc::channel(total.max(1));
        let queue = Arc::new(Mutex::new(VecDeque::from(addresses)));
        let stats = Arc::new(BatchStats::new());
        let start_time = Instant::now();
        let cancel = self.cancel.child_token();

        info!(
            "Resolving {} address(es) with {} worker(s)",
            total, workers
        );

        let mut tasks = FuturesUnordered::new();
        for id in 0..workers {
            tasks.push(tokio::spawn(run_worker(WorkerParams {
                id,
                resolver: Arc::clone(&self.resolver),
                queue: Arc::clone(&queue),
                results: tx.clone(),
                cancel: cancel.clone(),
                fail_mode: self.config.fail_mode,
                stats: Arc::clone(&stats),
            })));
        }
        // Workers hold the only senders: the channel closes when the last one exits.
        drop(tx);

        let shutdown = CancellationToken::new();
        let logging_task =
            progress::spawn_progress_logger(start_time, Arc::clone(&stats), total, shutdown.clone());

        let batch_cancel = cancel.clone();
        let coordinator_stats = Arc::clone(&stats);
        let coordinator = tokio::spawn(async move {
            while let Some(task_result) = tasks.next().await {
                if let Err(join_error) = task_result {
                    warn!("Worker panicked: {:?}", join_error);
                }
            }

            shutdown.cancel();
            let _ = logging_task.await;

            let report = BatchReport::from_stats(
                &coordinator_stats,
                batch_cancel.is_cancelled(),
                start_time.elapsed(),
            );
            info!(
                "Batch finished: total={}, resolved={}, partial={}, failed={} in {:.2}s",
                report.total,
                report.resolved,
                report.partial,
                report.failed,
                report.elapsed.as_secs_f64()
            );
            coordinator_stats.log_error_breakdown();
            report
        });

        BatchHandle {
            results: rx,
            completion: BatchCompletion {
                task: coordinator,
                stats,
                start_time,
                cancel,
            },
        }
    }

    /// Resolves `addresses`, feeding every outcome to `sink` from a dedicated
    /// consumer task as soon as it arrives.
    ///
    /// Returns once all workers are done and the consumer has drained every
    /// buffered outcome.
    pub async fn run<F>(&self, addresses: Vec<String>, mut sink: F) -> BatchReport
    where
        F: FnMut(LookupOutcome) + Send + 'static,
    {
        let (mut results, completion) = self.resolve_all(addresses).into_parts();

        let consumer = tokio::spawn(async move {
            while let Some(outcome) = results.recv().await {
                sink(outcome);
            }
        });

        let report = completion.wait().await;
        if let Err(join_error) = consumer.await {
            warn!("Result consumer panicked: {:?}", join_error);
        }
        report
    }
}

/// Running batch started by [`BatchPipeline::resolve_all`].
pub struct BatchHandle {
    results: mpsc::Receiver<LookupOutcome>,
    completion: BatchCompletion,
}

impl BatchHandle {
    /// Next outcome, or `None` once every worker finished and the buffer is
    /// empty.
    pub async fn next(&mut self) -> Option<LookupOutcome> {
        self.results.recv().await
    }

    /// Stops the batch: lookups that have not dialed yet fail with
    /// [`WhoisError::Cancelled`].
    pub fn cancel(&self) {
        self.completion.cancel.cancel();
    }

    /// Drains the remaining outcomes into a vector and waits for the report.
    pub async fn collect(mut self) -> (Vec<LookupOutcome>, BatchReport) {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.results.recv().await {
            outcomes.push(outcome);
        }
        let report = self.completion.wait().await;
        (outcomes, report)
    }

    /// Splits the handle into the outcome receiver and the completion half.
    pub fn into_parts(self) -> (mpsc::Receiver<LookupOutcome>, BatchCompletion) {
        (self.results, self.completion)
    }
}

/// Completion half of a [`BatchHandle`].
pub struct BatchCompletion {
    task: JoinHandle<BatchReport>,
    stats: Arc<BatchStats>,
    start_time: Instant,
    cancel: CancellationToken,
}

impl BatchCompletion {
    /// Waits until every worker has exited.
    pub async fn wait(self) -> BatchReport {
        match self.task.await {
            Ok(report) => report,
            Err(join_error) => {
                warn!("Batch coordinator failed: {:?}", join_error);
                BatchReport::from_stats(
                    &self.stats,
                    self.cancel.is_cancelled(),
                    self.start_time.elapsed(),
                )
            }
        }
    }
}
