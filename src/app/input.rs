//! Address list input.

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Trims `line` and drops blanks and `#` comments.
fn address_from_line(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

/// Reads one address per line from `reader`.
pub async fn read_address_lines<R: AsyncRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut lines = BufReader::new(reader).lines();
    let mut addresses = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read line from input")?
    {
        if let Some(address) = address_from_line(&line) {
            addresses.push(address.to_string());
        }
    }
    Ok(addresses)
}

/// Collects the addresses to resolve: positional arguments first, then the
/// lines of `file` (`-` for stdin).
///
/// Addresses are not validated; servers decide what they accept.
pub async fn collect_addresses(positional: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut addresses: Vec<String> = positional
        .iter()
        .filter_map(|a| address_from_line(a))
        .map(str::to_string)
        .collect();

    if let Some(path) = file {
        let from_file = if path.as_os_str() == "-" {
            info!("Reading addresses from stdin");
            read_address_lines(tokio::io::stdin()).await?
        } else {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            read_address_lines(file).await?
        };
        debug!("Read {} address(es) from input", from_file.len());
        addresses.extend(from_file);
    }

    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_address_lines_skips_comments_and_blanks() {
        let input: &[u8] = b"1.1.1.1\n\n# comment\n  2001:db8::1  \r\n8.8.8.8";
        let addresses = read_address_lines(input).await.unwrap();
        assert_eq!(addresses, vec!["1.1.1.1", "2001:db8::1", "8.8.8.8"]);
    }

    #[tokio::test]
    async fn test_collect_addresses_from_args_and_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "5.9.0.1").unwrap();
        writeln!(file, "# skipped").unwrap();
        writeln!(file, "167.56.0.1").unwrap();

        let addresses = collect_addresses(&["1.1.1.1".to_string()], Some(file.path()))
            .await
            .unwrap();
        assert_eq!(addresses, vec!["1.1.1.1", "5.9.0.1", "167.56.0.1"]);
    }

    #[tokio::test]
    async fn test_collect_addresses_missing_file() {
        let err = collect_addresses(&[], Some(Path::new("/nonexistent/addresses.txt")))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open input file"));
    }
}
