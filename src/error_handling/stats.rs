//! Batch statistics tracking.
//!
//! Thread-safe counters updated by the pipeline workers as lookups finish.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::whois::Record;

use super::types::{ErrorKind, WhoisError};

/// Thread-safe lookup statistics.
///
/// Every [`ErrorKind`] gets a counter on creation, so recording never has to
/// insert. Share across workers with `Arc`.
///
/// Categories:
/// - **resolved**: the lookup reached an authoritative server
/// - **partial**: a record came back with its `recurse_error` set
/// - **failed**: no record at all
/// - **cancelled**: failed because the batch was cancelled before the first
///   hop dialed (a subset of failed)
pub struct BatchStats {
    resolved: AtomicUsize,
    partial: AtomicUsize,
    failed: AtomicUsize,
    cancelled: AtomicUsize,
    errors: HashMap<ErrorKind, AtomicUsize>,
}

impl Default for BatchStats {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in ErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }

        BatchStats {
            resolved: AtomicUsize::new(0),
            partial: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            cancelled: AtomicUsize::new(0),
            errors,
        }
    }

    /// Classifies one lookup outcome.
    pub fn record(&self, result: &Result<Record, WhoisError>) {
        match result {
            Ok(record) => match &record.recurse_error {
                None => {
                    self.resolved.fetch_add(1, Ordering::Relaxed);
                }
                Some(e) => {
                    self.partial.fetch_add(1, Ordering::Relaxed);
                    self.increment_error(e.kind());
                }
            },
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                if let WhoisError::Cancelled { .. } = e {
                    self.cancelled.fetch_add(1, Ordering::Relaxed);
                }
                self.increment_error(e.kind());
            }
        }
    }

    fn increment_error(&self, kind: ErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                kind
            );
        }
    }

    pub fn resolved(&self) -> usize {
        self.resolved.load(Ordering::Relaxed)
    }

    pub fn partial(&self) -> usize {
        self.partial.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    /// Lookups that returned `Err(Cancelled)`. Partial records whose later
    /// hop was cancelled are not included.
    pub fn cancelled(&self) -> usize {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Number of outcomes (failed or partial) carrying an error of `kind`.
    pub fn error_count(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.resolved() + self.partial() + self.failed()
    }

    /// Logs non-zero error counters, one line per kind.
    pub fn log_error_breakdown(&self) {
        for kind in ErrorKind::iter() {
            let count = self.error_count(kind);
            if count > 0 {
                log::info!("{}: {}", kind.as_ref(), count);
            }
        }
    }
}
