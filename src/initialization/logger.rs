//! Logger initialization.

use std::io::Write;

use crate::config::{LogFormat, WIRE_LOG_TARGET};
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` on stderr, so stdout only carries results. The
/// `RUST_LOG` environment variable is read first and `level` overrides it.
/// With `wire` set, raw WHOIS traffic logged by verbose resolvers is shown
/// regardless of `level`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=ip_whois=debug ip_whois 1.1.1.1
///
/// # Dump queries and responses
/// ip_whois -v 1.1.1.1
/// ```
pub fn init_logger_with(
    level: LevelFilter,
    format: LogFormat,
    wire: bool,
) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    builder.filter_module("ip_whois", level);
    if wire {
        builder.filter_module(WIRE_LOG_TARGET, LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };

                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init so that tests initializing twice get an error instead of a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
