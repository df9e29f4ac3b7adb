//! Configuration types.
//!
//! Plain structs with named fields and documented defaults. They carry no CLI
//! dependencies and can be built programmatically; [`crate::config::Cli`] maps
//! command-line flags onto them.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    ARIN_QUERY_PREFIX, DEFAULT_CONCURRENCY, DEFAULT_MAX_RECURSION_DEPTH, DEFAULT_PER_HOP_TIMEOUT,
    DEFAULT_ROOT_SERVER,
};
use crate::error_handling::ConfigError;
use crate::whois::normalize_server_address;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Rendering of batch results on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `ADDR,ORG,COUNTRY,RECURSE_ERR` rows
    Csv,
    /// One JSON object per address, including the full referral chain
    Jsonl,
}

/// What the batch pipeline does when one address fails outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FailMode {
    /// Cancel every pending lookup on the first failed address
    FailFast,
    /// Report the failure and keep resolving the remaining addresses
    BestEffort,
}

/// Settings of a [`crate::Resolver`].
///
/// Immutable once the resolver is built; [`ResolverConfig::validate`] runs at
/// construction time so that lookups never see an invalid configuration.
///
/// # Examples
///
/// ```
/// use ip_whois::ResolverConfig;
/// use std::time::Duration;
///
/// let config = ResolverConfig {
///     root_server: "whois.ripe.net".to_string(),
///     per_hop_timeout: Duration::from_secs(5),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// First server queried for every address (`host` or `host:port`)
    pub root_server: String,

    /// Maximum number of hops performed while following referrals
    pub max_recursion_depth: usize,

    /// Time budget of a single hop (dial, write and read combined)
    pub per_hop_timeout: Duration,

    /// Marker put in front of the address when querying the root server
    pub root_query_prefix: String,

    /// Emit raw queries and responses on the wire log target
    pub verbose: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            root_server: DEFAULT_ROOT_SERVER.to_string(),
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            per_hop_timeout: DEFAULT_PER_HOP_TIMEOUT,
            root_query_prefix: ARIN_QUERY_PREFIX.to_string(),
            verbose: false,
        }
    }
}

impl ResolverConfig {
    /// Checks that the configuration can drive a lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the root server is empty or cannot be split
    /// into host and port, when the recursion depth is zero, or when the
    /// per-hop timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_server.trim().is_empty() {
            return Err(ConfigError::EmptyRootServer);
        }
        normalize_server_address(&self.root_server).map_err(|e| {
            ConfigError::InvalidRootServer {
                address: self.root_server.clone(),
                reason: e.to_string(),
            }
        })?;
        if self.max_recursion_depth == 0 {
            return Err(ConfigError::ZeroRecursionDepth);
        }
        if self.per_hop_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

/// Settings of a [`crate::BatchPipeline`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on concurrently resolved addresses
    pub concurrency: usize,

    /// Whether one failed address aborts the rest of the batch
    pub fail_mode: FailMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            fail_mode: FailMode::FailFast,
        }
    }
}

impl PipelineConfig {
    /// Checks the pipeline settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroConcurrency`] when no worker could run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }
}
