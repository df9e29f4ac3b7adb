//! CSV rendering of lookup outcomes.
//!
//! One row per address: `ADDR,ORG,COUNTRY,RECURSE_ERR`.

use anyhow::{Context, Result};
use csv::Writer;
use std::io::Write;

use crate::config::CSV_HEADER;
use crate::pipeline::LookupOutcome;

use super::country_of;

/// Streams outcomes as CSV rows, flushing after each one.
pub struct CsvExporter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CsvExporter<W> {
    /// Wraps `output` and writes the header row.
    pub fn new(output: W) -> Result<Self> {
        let mut writer = Writer::from_writer(output);
        writer
            .write_record(CSV_HEADER)
            .context("Failed to write CSV header")?;
        writer.flush().context("Failed to flush CSV header")?;
        Ok(Self { writer })
    }

    pub fn write(&mut self, outcome: &LookupOutcome) -> Result<()> {
        self.writer
            .write_record(csv_row(outcome))
            .with_context(|| format!("Failed to write CSV row for {}", outcome.address))?;
        self.writer.flush().context("Failed to flush CSV output")?;
        Ok(())
    }
}

/// Fields of the row for `outcome`.
///
/// Addresses without any record get empty ORG/COUNTRY and `false`.
pub fn csv_row(outcome: &LookupOutcome) -> [String; 4] {
    match outcome.record() {
        Some(record) => [
            outcome.address.clone(),
            record.display_name().to_string(),
            country_of(record).to_string(),
            record.recurse_error.is_some().to_string(),
        ],
        None => [
            outcome.address.clone(),
            String::new(),
            String::new(),
            false.to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::WhoisError;
    use crate::whois::Record;

    fn outcome(address: &str, result: Result<Record, WhoisError>) -> LookupOutcome {
        LookupOutcome {
            address: address.to_string(),
            result,
        }
    }

    #[test]
    fn test_csv_output() {
        let mut buffer = Vec::new();
        {
            let mut exporter = CsvExporter::new(&mut buffer).unwrap();
            exporter
                .write(&outcome(
                    "1.1.1.1",
                    Ok(Record {
                        organization: "apnic research and development".to_string(),
                        country: "au".to_string(),
                        ..Default::default()
                    }),
                ))
                .unwrap();
            exporter
                .write(&outcome(
                    "5.9.0.1",
                    Ok(Record {
                        organization: "joe's datacenter, llc".to_string(),
                        recurse_error: Some(WhoisError::Cancelled {
                            server: "whois.ripe.net:43".to_string(),
                        }),
                        ..Default::default()
                    }),
                ))
                .unwrap();
            exporter
                .write(&outcome(
                    "10.0.0.1",
                    Err(WhoisError::Cancelled {
                        server: "whois.arin.net:43".to_string(),
                    }),
                ))
                .unwrap();
        }

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ADDR,ORG,COUNTRY,RECURSE_ERR",
                "1.1.1.1,apnic research and development,au,false",
                "5.9.0.1,\"joe's datacenter, llc\",,true",
                "10.0.0.1,,,false",
            ]
        );
    }

    #[test]
    fn test_csv_row_uses_parent_name() {
        let record = Record {
            parent: Some(Box::new(Record {
                net_name: "net-5-9".to_string(),
                country: "de".to_string(),
                ..Default::default()
            })),
            ..Default::default()
        };
        let row = csv_row(&outcome("5.9.0.1", Ok(record)));
        assert_eq!(row[1], "net-5-9");
        assert_eq!(row[2], "de");
    }
}
