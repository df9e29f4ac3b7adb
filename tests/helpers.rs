// Shared test helpers: an in-memory WHOIS network.
//
// `MockDialer` answers connections to known `host:port` keys over
// `tokio::io::duplex`, records every query line and counts dials.

#![allow(dead_code)] // Not every test file uses every helper

use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream};

use ip_whois::Dialer;

type Responder = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone)]
struct MockServer {
    responder: Responder,
    dial_delay: Duration,
    response_delay: Duration,
    panic_on_dial: bool,
}

/// Counters shared between a `MockDialer` and the test inspecting it.
#[derive(Default)]
pub struct Counters {
    dial_attempts: AtomicUsize,
    connections: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    queries: Mutex<Vec<(String, String)>>,
}

impl Counters {
    /// Calls to `connect`, including refused and abandoned ones.
    pub fn dial_attempts(&self) -> usize {
        self.dial_attempts.load(Ordering::SeqCst)
    }

    /// Dials that produced a stream.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Highest number of simultaneously open connections.
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    /// `(server, query line without CRLF)` in arrival order.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.queries.lock().unwrap().clone()
    }
}

#[derive(Clone, Default)]
pub struct MockDialer {
    servers: HashMap<String, MockServer>,
    counters: Arc<Counters>,
    down: Arc<Mutex<HashSet<String>>>,
}

impl MockDialer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `server` answers every query with `body`.
    pub fn respond(self, server: &str, body: &str) -> Self {
        let body = body.to_string();
        self.respond_with(server, move |_| body.clone())
    }

    /// `server` answers with `responder(query)`; the query has no CRLF.
    pub fn respond_with<F>(mut self, server: &str, responder: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.servers.insert(
            server.to_string(),
            MockServer {
                responder: Arc::new(responder),
                dial_delay: Duration::ZERO,
                response_delay: Duration::ZERO,
                panic_on_dial: false,
            },
        );
        self
    }

    /// Delays accepting connections to an already registered `server`.
    pub fn dial_delay(mut self, server: &str, delay: Duration) -> Self {
        if let Some(s) = self.servers.get_mut(server) {
            s.dial_delay = delay;
        }
        self
    }

    /// Delays the answer of an already registered `server`.
    pub fn response_delay(mut self, server: &str, delay: Duration) -> Self {
        if let Some(s) = self.servers.get_mut(server) {
            s.response_delay = delay;
        }
        self
    }

    /// Makes dials to an already registered `server` panic.
    pub fn panic_on_dial(mut self, server: &str) -> Self {
        if let Some(s) = self.servers.get_mut(server) {
            s.panic_on_dial = true;
        }
        self
    }

    /// Refuses connections to `server` until [`MockDialer::bring_up`].
    /// Affects every clone of this dialer.
    pub fn take_down(&self, server: &str) {
        self.down.lock().unwrap().insert(server.to_string());
    }

    pub fn bring_up(&self, server: &str) {
        self.down.lock().unwrap().remove(server);
    }

    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }
}

impl Dialer for MockDialer {
    type Stream = DuplexStream;

    async fn connect(&self, host_port: &str) -> io::Result<DuplexStream> {
        self.counters.dial_attempts.fetch_add(1, Ordering::SeqCst);

        let is_down = self.down.lock().unwrap().contains(host_port);
        let server = self.servers.get(host_port).cloned().filter(|_| !is_down);
        let Some(server) = server else {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                format!("connection refused by {host_port}"),
            ));
        };

        if server.panic_on_dial {
            panic!("dialer blew up on {host_port}");
        }

        if !server.dial_delay.is_zero() {
            tokio::time::sleep(server.dial_delay).await;
        }

        let counters = Arc::clone(&self.counters);
        counters.connections.fetch_add(1, Ordering::SeqCst);
        let active = counters.active.fetch_add(1, Ordering::SeqCst) + 1;
        counters.max_active.fetch_max(active, Ordering::SeqCst);

        let (client, server_end) = tokio::io::duplex(64 * 1024);
        let host_port = host_port.to_string();
        tokio::spawn(async move {
            let mut reader = BufReader::new(server_end);
            let mut line = String::new();
            let _ = reader.read_line(&mut line).await;
            let query = line.trim_end_matches(['\r', '\n']).to_string();
            counters
                .queries
                .lock()
                .unwrap()
                .push((host_port, query.clone()));

            if !server.response_delay.is_zero() {
                tokio::time::sleep(server.response_delay).await;
            }

            let body = (server.responder)(&query);
            let mut server_end = reader.into_inner();
            let _ = server_end.write_all(body.as_bytes()).await;
            counters.active.fetch_sub(1, Ordering::SeqCst);
            // Dropping `server_end` closes the stream, ending the response.
        });

        Ok(client)
    }
}

/// Address part of a root query (`n + 1.2.3.4` -> `1.2.3.4`).
pub fn strip_root_prefix(query: &str) -> &str {
    query.strip_prefix("n + ").unwrap_or(query)
}
