//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, ports, wire markers)
//! - Resolver and pipeline configuration structs
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

pub use cli::Cli;
pub use constants::*;
pub use types::{FailMode, LogFormat, LogLevel, OutputFormat, PipelineConfig, ResolverConfig};
