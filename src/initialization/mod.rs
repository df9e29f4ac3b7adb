//! Application initialization and resource setup.
//!
//! This module builds the shared resources of a run:
//! - the logger
//! - the dialer (direct TCP or SOCKS5)
//! - the resolver and the batch pipeline

mod logger;

use std::sync::Arc;

use crate::config::{PipelineConfig, ResolverConfig};
use crate::error_handling::ConfigError;
use crate::pipeline::BatchPipeline;
use crate::whois::{Dialer, Resolver};

pub use logger::init_logger_with;

/// Builds the resolver and wraps it in a pipeline.
///
/// # Errors
///
/// Returns [`ConfigError`] when either configuration is invalid.
pub fn init_pipeline<D: Dialer>(
    dialer: D,
    resolver_config: ResolverConfig,
    pipeline_config: PipelineConfig,
) -> Result<BatchPipeline<D>, ConfigError> {
    let resolver = Arc::new(Resolver::new(dialer, resolver_config)?);
    BatchPipeline::new(resolver, pipeline_config)
}
