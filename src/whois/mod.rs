//! WHOIS lookups over RFC 3912.
//!
//! - [`parse`]: free-text response body to [`Record`]
//! - [`Resolver`]: referral-following lookup of one address
//! - [`Dialer`]: how streams to WHOIS servers are opened (direct or SOCKS5)

mod address;
mod dialer;
mod parse;
mod resolver;
mod types;

pub use address::normalize_server_address;
pub use dialer::{Dialer, Socks5Dialer, TcpDialer};
pub use parse::parse;
pub use resolver::Resolver;
pub use types::{Chain, HopSummary, Record};
