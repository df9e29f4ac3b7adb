//! Recursive WHOIS resolution.
//!
//! A lookup starts at the root server and follows `ReferralServer`-style hints
//! until a server answers without one. The WHOIS exchange itself follows
//! RFC 3912:
//!
//! ```text
//! client                           server
//!
//! open TCP   ---- (SYN) ------------------------------>
//!            <---- (SYN+ACK) -------------------------
//! send query ---- "1.1.1.1<CR><LF>" ------------------>
//! get answer <---- "Info about 1.1.1.1<CR><LF>" -------
//!            <---- "More info<CR><LF>" ----------------
//! close      <---- (FIN) ------------------------------
//! ```

use log::{debug, warn};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::time::{timeout_at, Instant};
use tokio_util::sync::CancellationToken;

use crate::config::{ResolverConfig, WIRE_LOG_TARGET};
use crate::error_handling::{ConfigError, HopStage, WhoisError};

use super::address::{build_query, normalize_server_address};
use super::dialer::Dialer;
use super::parse::parse;
use super::types::Record;

/// Follows WHOIS referrals for one address at a time.
///
/// Holds only the dialer and immutable settings, so a single instance (behind
/// an `Arc`) serves any number of concurrent lookups.
pub struct Resolver<D> {
    dialer: D,
    config: ResolverConfig,
    root_server: String,
}

impl<D: Dialer> Resolver<D> {
    /// Builds a resolver after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is unusable.
    pub fn new(dialer: D, config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let root_server = normalize_server_address(&config.root_server).map_err(|e| {
            ConfigError::InvalidRootServer {
                address: config.root_server.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            dialer,
            config,
            root_server,
        })
    }

    /// Resolves `address`, following referrals from the root server.
    ///
    /// Outcomes:
    /// - the authoritative record, with the records of earlier hops chained
    ///   through `parent`;
    /// - the last good record with `recurse_error` set, when a hop after the
    ///   first fails or the recursion limit is hit with a referral pending;
    /// - an error, when the first hop fails.
    ///
    /// `cancel` is checked before every dial and aborts a dial in progress.
    /// Writes and reads are bounded by the hop deadline only.
    ///
    /// # Errors
    ///
    /// Returns the [`WhoisError`] of the first hop when nothing was learned.
    pub async fn resolve(
        &self,
        cancel: &CancellationToken,
        address: &str,
    ) -> Result<Record, WhoisError> {
        let mut server = self.config.root_server.clone();
        let mut parent: Option<Record> = None;

        for hop in 0..self.config.max_recursion_depth {
            debug!("Querying {} for {} (hop {})", server, address, hop);

            let mut record = match self.query(cancel, &server, address).await {
                Ok(record) => record,
                Err(e) => {
                    return match parent {
                        Some(mut last) => {
                            warn!("Referral for {} to {} failed: {}", address, server, e);
                            last.recurse_error = Some(e);
                            Ok(last)
                        }
                        None => Err(e),
                    };
                }
            };

            record.address = address.to_string();
            record.parent = parent.take().map(Box::new);

            if record.is_authoritative() {
                return Ok(record);
            }

            server = record.referral_server.clone();
            parent = Some(record);
        }

        let depth = self.config.max_recursion_depth;
        let Some(mut last) = parent else {
            return Err(WhoisError::MaxDepthExceeded {
                depth,
                referral: server,
            });
        };
        warn!(
            "Giving up on {} after {} hops, referral to {} left unfollowed",
            address, depth, last.referral_server
        );
        last.recurse_error = Some(WhoisError::MaxDepthExceeded {
            depth,
            referral: last.referral_server.clone(),
        });
        Ok(last)
    }

    /// One hop: ask `server` about `address` and parse the answer.
    async fn query(
        &self,
        cancel: &CancellationToken,
        server: &str,
        address: &str,
    ) -> Result<Record, WhoisError> {
        let server = normalize_server_address(server)?;
        let query = build_query(
            &server,
            &self.root_server,
            &self.config.root_query_prefix,
            address,
        );

        let body = self.exchange(cancel, &server, &query).await?;

        let mut record = parse(&String::from_utf8_lossy(&body));
        record.server = server;
        Ok(record)
    }

    /// Sends `query` and reads until the server closes the stream.
    ///
    /// Dial, write and read share one deadline, `per_hop_timeout` after the
    /// hop started.
    async fn exchange(
        &self,
        cancel: &CancellationToken,
        server: &str,
        query: &str,
    ) -> Result<Vec<u8>, WhoisError> {
        let timeout = self.config.per_hop_timeout;
        let timed_out = |stage| WhoisError::Timeout {
            server: server.to_string(),
            stage,
            timeout,
        };

        if cancel.is_cancelled() {
            return Err(WhoisError::Cancelled {
                server: server.to_string(),
            });
        }

        let deadline = Instant::now() + timeout;

        let mut stream = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(WhoisError::Cancelled { server: server.to_string() });
            }
            dialed = timeout_at(deadline, self.dialer.connect(server)) => match dialed {
                Ok(Ok(stream)) => stream,
                Ok(Err(e)) => return Err(WhoisError::transport(server, HopStage::Dial, &e)),
                Err(_) => return Err(timed_out(HopStage::Dial)),
            },
        };

        self.trace_wire(">>", server, query.as_bytes());
        match timeout_at(deadline, stream.write_all(query.as_bytes())).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(WhoisError::transport(server, HopStage::Write, &e)),
            Err(_) => return Err(timed_out(HopStage::Write)),
        }

        let mut body = Vec::new();
        match timeout_at(deadline, stream.read_to_end(&mut body)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(WhoisError::transport(server, HopStage::Read, &e)),
            Err(_) => return Err(timed_out(HopStage::Read)),
        }
        self.trace_wire("<<", server, &body);

        Ok(body)
    }

    fn trace_wire(&self, direction: &str, server: &str, payload: &[u8]) {
        if !self.config.verbose {
            return;
        }
        let text = String::from_utf8_lossy(payload);
        for line in text.lines() {
            debug!(target: WIRE_LOG_TARGET, "{} {}\t{}", direction, server, line);
        }
    }
}
