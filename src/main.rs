//! Main application entry point (CLI binary).
//!
//! Thin wrapper around the `ip_whois` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Dialer selection (direct or SOCKS5)
//! - Result output and exit codes

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;
use std::io;
use std::process;

use ip_whois::app::{collect_addresses, exit_code, EXIT_FAILURE};
use ip_whois::config::Cli;
use ip_whois::export::{IgnoreBrokenPipe, OutcomeExporter};
use ip_whois::initialization::{init_logger_with, init_pipeline};
use ip_whois::{BatchReport, Dialer, Socks5Dialer, TcpDialer};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone(), cli.verbose)
        .context("Failed to initialize logger")?;

    let fail_mode = cli.fail_mode;
    let result = match cli.proxy.as_deref() {
        Some(proxy) => match Socks5Dialer::new(proxy) {
            Ok(dialer) => run(dialer, &cli).await,
            Err(e) => Err(anyhow::Error::new(e).context("Failed to configure SOCKS5 proxy")),
        },
        None => run(TcpDialer, &cli).await,
    };

    match result {
        Ok(report) => process::exit(exit_code(&report, fail_mode)),
        Err(e) => {
            eprintln!("ip_whois error: {:#}", e);
            process::exit(EXIT_FAILURE);
        }
    }
}

async fn run<D: Dialer>(dialer: D, cli: &Cli) -> Result<BatchReport> {
    let addresses = collect_addresses(&cli.addresses, cli.file.as_deref())
        .await
        .context("Failed to read addresses")?;
    if addresses.is_empty() {
        bail!("at least one address must be specified, either as an argument or via --file");
    }

    let pipeline = init_pipeline(dialer, cli.resolver_config(), cli.pipeline_config())
        .context("Invalid configuration")?;

    let cancel = pipeline.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling pending lookups");
            cancel.cancel();
        }
    });

    let mut exporter = OutcomeExporter::new(cli.format, IgnoreBrokenPipe::new(io::stdout()))
        .context("Failed to initialize output")?;

    let report = pipeline
        .run(addresses, move |outcome| {
            if let Err(e) = exporter.write(&outcome) {
                warn!("{:#}", e);
            }
        })
        .await;

    Ok(report)
}
