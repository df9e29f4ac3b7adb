//! Error type definitions.
//!
//! This module defines the errors raised while configuring, initializing and
//! running WHOIS lookups.

use std::io;
use std::time::Duration;

use log::SetLoggerError;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterMacro};
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Invalid settings detected while building a resolver, pipeline or dialer.
///
/// These are fatal: no lookup is attempted with a configuration that failed
/// validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The root server address is empty.
    #[error("root server address is empty")]
    EmptyRootServer,

    /// The root server address cannot be split into host and port.
    #[error("invalid root server '{address}': {reason}")]
    InvalidRootServer { address: String, reason: String },

    /// Following zero referrals would never query anything.
    #[error("max recursion depth must be at least 1")]
    ZeroRecursionDepth,

    /// A zero hop budget expires before the dial starts.
    #[error("per-hop timeout must be greater than zero")]
    ZeroTimeout,

    /// The batch pipeline needs at least one worker.
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,

    /// The SOCKS5 proxy target is unusable.
    #[error("invalid proxy '{address}': {reason}")]
    InvalidProxy { address: String, reason: String },
}

/// Step of a hop during which a failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum HopStage {
    Dial,
    Write,
    Read,
}

/// Failure of a single WHOIS lookup or of one hop within it.
///
/// Cloneable and comparable so that it can live inside a
/// [`crate::Record`] as its `recurse_error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhoisError {
    /// A server address that cannot be split into host and port.
    #[error("invalid server address '{address}': {reason}")]
    AddressFormat { address: String, reason: String },

    /// Dial, write or read failure reported by the stream.
    #[error("{stage} {server}: {message}")]
    Transport {
        server: String,
        stage: HopStage,
        kind: io::ErrorKind,
        message: String,
    },

    /// The hop budget ran out.
    #[error("{stage} {server}: timed out after {timeout:?}")]
    Timeout {
        server: String,
        stage: HopStage,
        timeout: Duration,
    },

    /// The shared cancellation token fired before or during the dial.
    #[error("lookup cancelled before reaching {server}")]
    Cancelled { server: String },

    /// Referrals kept coming after the configured number of hops.
    #[error("stopped after {depth} hops with a referral to '{referral}' pending")]
    MaxDepthExceeded { depth: usize, referral: String },

    /// The lookup task panicked (e.g. inside a custom dialer).
    #[error("lookup panicked: {message}")]
    Panicked { message: String },
}

impl WhoisError {
    pub(crate) fn transport(server: &str, stage: HopStage, err: &io::Error) -> Self {
        WhoisError::Transport {
            server: server.to_string(),
            stage,
            kind: err.kind(),
            message: err.to_string(),
        }
    }

    /// Category of this error, used for statistics.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WhoisError::AddressFormat { .. } => ErrorKind::AddressFormat,
            WhoisError::Transport { .. } => ErrorKind::Transport,
            WhoisError::Timeout { .. } => ErrorKind::Timeout,
            WhoisError::Cancelled { .. } => ErrorKind::Cancelled,
            WhoisError::MaxDepthExceeded { .. } => ErrorKind::MaxDepthExceeded,
            WhoisError::Panicked { .. } => ErrorKind::Panicked,
        }
    }
}

/// Categories of [`WhoisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    AddressFormat,
    Transport,
    Timeout,
    Cancelled,
    MaxDepthExceeded,
    Panicked,
}
