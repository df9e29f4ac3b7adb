//! Stream dialers.
//!
//! The resolver only needs something that opens a byte stream to `host:port`.
//! Deadlines and cancellation are applied by the resolver around the returned
//! future and stream, so dialers stay oblivious of both.

use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_socks::tcp::Socks5Stream;

use crate::config::DEFAULT_SOCKS5_PORT;
use crate::error_handling::ConfigError;

use super::address::with_default_port;

/// Opens byte streams to WHOIS servers.
///
/// Implementations are shared by every in-flight lookup and must tolerate
/// concurrent calls.
pub trait Dialer: Send + Sync + 'static {
    /// Connection returned by [`Dialer::connect`].
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    /// Connects to `host_port`. Dropping the future abandons the attempt.
    fn connect(&self, host_port: &str) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

impl<D: Dialer> Dialer for Arc<D> {
    type Stream = D::Stream;

    fn connect(&self, host_port: &str) -> impl Future<Output = io::Result<Self::Stream>> + Send {
        self.as_ref().connect(host_port)
    }
}

/// Direct TCP connections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpDialer;

impl Dialer for TcpDialer {
    type Stream = TcpStream;

    async fn connect(&self, host_port: &str) -> io::Result<TcpStream> {
        let stream = TcpStream::connect(host_port).await?;
        stream.set_nodelay(true)?;
        Ok(stream)
    }
}

/// Connections tunnelled through a SOCKS5 proxy (e.g. Tor).
///
/// Server names are handed to the proxy unresolved, so no local DNS lookup
/// happens for WHOIS servers.
#[derive(Debug, Clone)]
pub struct Socks5Dialer {
    proxy: String,
}

impl Socks5Dialer {
    /// Validates `proxy` (`host[:port]`, port defaults to 1080).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProxy`] when the address cannot be split
    /// or its port is not a number.
    pub fn new(proxy: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidProxy {
            address: proxy.to_string(),
            reason,
        };

        if proxy.trim().is_empty() {
            return Err(invalid("empty address".to_string()));
        }
        let normalized =
            with_default_port(proxy, DEFAULT_SOCKS5_PORT).map_err(|e| invalid(e.to_string()))?;
        let port = normalized.rsplit(':').next().unwrap_or_default();
        if port.parse::<u16>().is_err() {
            return Err(invalid(format!("invalid port '{port}'")));
        }

        Ok(Self { proxy: normalized })
    }

    /// Normalized `host:port` of the proxy.
    pub fn proxy(&self) -> &str {
        &self.proxy
    }
}

impl Dialer for Socks5Dialer {
    type Stream = Socks5Stream<TcpStream>;

    async fn connect(&self, host_port: &str) -> io::Result<Self::Stream> {
        Socks5Stream::connect(self.proxy.as_str(), host_port.to_string())
            .await
            .map_err(io::Error::other)
    }
}
