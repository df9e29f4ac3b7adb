//! Error handling and batch statistics.
//!
//! This module provides:
//! - Error type definitions for configuration, initialization and lookups
//! - Thread-safe statistics over lookup outcomes
//!
//! Outcomes are counted as:
//! - **Resolved**: an authoritative record was reached
//! - **Partial**: a record was returned but a later hop failed
//! - **Failed**: the very first hop failed, nothing to report

mod stats;
mod types;

pub use stats::BatchStats;
pub use types::{ConfigError, ErrorKind, HopStage, InitializationError, WhoisError};
