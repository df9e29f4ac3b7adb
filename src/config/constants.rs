//! Configuration constants.
//!
//! Defaults for the resolver, the batch pipeline and the outer CLI surface.

use std::time::Duration;

/// Root WHOIS server every lookup starts from.
pub const DEFAULT_ROOT_SERVER: &str = "whois.arin.net";

/// Well-known WHOIS port (RFC 3912).
pub const DEFAULT_WHOIS_PORT: u16 = 43;

/// Budget for one hop: dial, write and read together.
pub const DEFAULT_PER_HOP_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of servers visited while following referrals.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 5;

/// Number of addresses resolved in parallel in batch mode.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Port assumed for a SOCKS5 proxy given without one.
pub const DEFAULT_SOCKS5_PORT: u16 = 1080;

/// Marker ARIN expects in front of numeric queries so that `n + 1.2.3.4`
/// is looked up as a network rather than matched against every record type.
pub const ARIN_QUERY_PREFIX: &str = "n + ";

/// Line terminator for WHOIS queries.
pub const QUERY_TERMINATOR: &str = "\r\n";

/// Log target used for raw wire traffic when a resolver runs verbose.
pub const WIRE_LOG_TARGET: &str = "ip_whois::wire";

/// Header row of the CSV rendering.
pub const CSV_HEADER: [&str; 4] = ["ADDR", "ORG", "COUNTRY", "RECURSE_ERR"];

/// Seconds between progress log lines during a batch.
pub const LOGGING_INTERVAL: u64 = 5;
