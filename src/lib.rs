//! ip_whois library: batch WHOIS lookups for IP addresses
//!
//! Resolves who owns an address by querying a root WHOIS server and following
//! referrals down to the registry that is authoritative for it, for many
//! addresses at once.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ip_whois::{BatchPipeline, PipelineConfig, Resolver, ResolverConfig, TcpDialer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = Arc::new(Resolver::new(TcpDialer, ResolverConfig::default())?);
//! let pipeline = BatchPipeline::new(resolver, PipelineConfig::default())?;
//!
//! let addresses = vec!["1.1.1.1".to_string(), "5.9.0.1".to_string()];
//! let report = pipeline
//!     .run(addresses, |outcome| match outcome.result {
//!         Ok(record) => println!("{},{}", outcome.address, record.display_name()),
//!         Err(e) => eprintln!("{}: {}", outcome.address, e),
//!     })
//!     .await;
//! println!("{} resolved, {} failed", report.resolved, report.failed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Lookups run on a Tokio runtime.

pub mod app;
pub mod config;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod pipeline;
pub mod whois;

pub use config::{FailMode, LogFormat, LogLevel, OutputFormat, PipelineConfig, ResolverConfig};
pub use error_handling::{BatchStats, ConfigError, ErrorKind, HopStage, WhoisError};
pub use pipeline::{BatchHandle, BatchPipeline, BatchReport, LookupOutcome};
pub use whois::{parse, Dialer, Record, Resolver, Socks5Dialer, TcpDialer};
