//! Server address handling and query construction.

use crate::config::{DEFAULT_WHOIS_PORT, QUERY_TERMINATOR};
use crate::error_handling::WhoisError;

/// Result of splitting a `host[:port]` string.
#[derive(Debug, PartialEq, Eq)]
enum HostPort<'a> {
    WithPort { host: &'a str, port: &'a str },
    MissingPort,
}

/// Splits `host:port`, `[v6]:port`, `host` or `[v6]`.
///
/// Hosts containing colons must be bracketed when a port is present; an
/// unbracketed address with more than one colon is ambiguous and rejected.
fn split_host_port(addr: &str) -> Result<HostPort<'_>, &'static str> {
    if let Some(rest) = addr.strip_prefix('[') {
        let Some(end) = rest.find(']') else {
            return Err("missing ']' in address");
        };
        let host = &rest[..end];
        let after = &rest[end + 1..];
        if after.is_empty() {
            return Ok(HostPort::MissingPort);
        }
        let Some(port) = after.strip_prefix(':') else {
            return Err("unexpected characters after ']' in address");
        };
        if port.contains(':') {
            return Err("too many colons in address");
        }
        return Ok(HostPort::WithPort { host, port });
    }

    if addr.contains(']') {
        return Err("unexpected ']' in address");
    }

    match addr.matches(':').count() {
        0 => Ok(HostPort::MissingPort),
        1 => {
            let (host, port) = addr.split_once(':').unwrap_or((addr, ""));
            Ok(HostPort::WithPort { host, port })
        }
        _ => Err("too many colons in address"),
    }
}

/// Joins host and port, bracketing hosts that contain colons.
fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// Appends the WHOIS port to `addr` when none is given.
///
/// An explicit port is kept as is, even a non-standard one. An empty port
/// (`host:`) counts as missing.
///
/// # Errors
///
/// Returns [`WhoisError::AddressFormat`] when `addr` cannot be split into host
/// and port, e.g. `1:23:23`.
pub fn normalize_server_address(addr: &str) -> Result<String, WhoisError> {
    with_default_port(addr, DEFAULT_WHOIS_PORT)
}

pub(crate) fn with_default_port(addr: &str, default_port: u16) -> Result<String, WhoisError> {
    let addr = addr.trim();
    match split_host_port(addr) {
        Ok(HostPort::MissingPort) => Ok(format!("{addr}:{default_port}")),
        Ok(HostPort::WithPort { host, port }) if port.is_empty() => {
            Ok(join_host_port(host, &default_port.to_string()))
        }
        Ok(HostPort::WithPort { host, port }) => Ok(join_host_port(host, port)),
        Err(reason) => Err(WhoisError::AddressFormat {
            address: addr.to_string(),
            reason: reason.to_string(),
        }),
    }
}

/// Builds the CRLF-terminated query line for `address`.
///
/// `prefix` is only put in front of the address when `server` is the root
/// server; both are expected in normalized form.
pub(crate) fn build_query(server: &str, root_server: &str, prefix: &str, address: &str) -> String {
    if server.eq_ignore_ascii_case(root_server) {
        format!("{prefix}{address}{QUERY_TERMINATOR}")
    } else {
        format!("{address}{QUERY_TERMINATOR}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_without_port() {
        assert_eq!(normalize_server_address("foo").unwrap(), "foo:43");
        assert_eq!(
            normalize_server_address("whois.ripe.net").unwrap(),
            "whois.ripe.net:43"
        );
    }

    #[test]
    fn test_normalize_keeps_port() {
        assert_eq!(normalize_server_address("foo:43").unwrap(), "foo:43");
        assert_eq!(normalize_server_address("foo:1043").unwrap(), "foo:1043");
        assert_eq!(normalize_server_address("host:79").unwrap(), "host:79");
    }

    #[test]
    fn test_normalize_empty_port() {
        assert_eq!(normalize_server_address("foo:").unwrap(), "foo:43");
    }

    #[test]
    fn test_normalize_ipv6() {
        assert_eq!(
            normalize_server_address("[2001:db8::1]").unwrap(),
            "[2001:db8::1]:43"
        );
        assert_eq!(
            normalize_server_address("[2001:db8::1]:4343").unwrap(),
            "[2001:db8::1]:4343"
        );
    }

    #[test]
    fn test_normalize_malformed() {
        let err = normalize_server_address("1:23:23").unwrap_err();
        assert!(matches!(err, WhoisError::AddressFormat { .. }));
        assert!(err.to_string().contains("too many"));

        assert!(normalize_server_address("[2001:db8::1").is_err());
        assert!(normalize_server_address("[::1]x").is_err());
        assert!(normalize_server_address("host]:43").is_err());
    }

    #[test]
    fn test_build_query_root_server() {
        assert_eq!(
            build_query("whois.arin.net:43", "whois.arin.net:43", "n + ", "1.1.1.1"),
            "n + 1.1.1.1\r\n"
        );
    }

    #[test]
    fn test_build_query_other_server() {
        assert_eq!(
            build_query("whois.ripe.net:43", "whois.arin.net:43", "n + ", "1.1.1.1"),
            "1.1.1.1\r\n"
        );
    }
}
