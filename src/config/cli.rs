//! Command-line options.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_RECURSION_DEPTH, DEFAULT_ROOT_SERVER,
};
use crate::config::types::{
    FailMode, LogFormat, LogLevel, OutputFormat, PipelineConfig, ResolverConfig,
};

/// Batch WHOIS resolver for IPv4/IPv6 addresses.
#[derive(Debug, Parser)]
#[command(name = "ip_whois", version, about)]
pub struct Cli {
    /// Addresses to resolve
    pub addresses: Vec<String>,

    /// File with one address per line (`-` reads stdin)
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// SOCKS5 proxy (`host[:port]`) to send queries through
    #[arg(short = 'x', long)]
    pub proxy: Option<String>,

    /// Log raw queries and responses
    #[arg(short, long)]
    pub verbose: bool,

    /// Maximum number of WHOIS lookups in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Server every lookup starts from
    #[arg(long, default_value = DEFAULT_ROOT_SERVER)]
    pub root_server: String,

    /// Time budget per hop in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_seconds: u64,

    /// Maximum number of referrals followed per address
    #[arg(long, default_value_t = DEFAULT_MAX_RECURSION_DEPTH)]
    pub max_recursion: usize,

    /// Behaviour when an address cannot be resolved at all
    #[arg(long, value_enum, default_value_t = FailMode::FailFast)]
    pub fail_mode: FailMode,

    /// Result format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Resolver settings carried by the flags.
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            root_server: self.root_server.clone(),
            max_recursion_depth: self.max_recursion,
            per_hop_timeout: Duration::from_secs(self.timeout_seconds),
            verbose: self.verbose,
            ..Default::default()
        }
    }

    /// Pipeline settings carried by the flags.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            concurrency: self.concurrency,
            fail_mode: self.fail_mode,
        }
    }
}
