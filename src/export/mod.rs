//! Rendering of batch results.
//!
//! CSV for the classic `ADDR,ORG,COUNTRY,RECURSE_ERR` table, JSONL when the
//! whole referral chain matters.

mod csv;
mod jsonl;

use anyhow::Result;
use std::io::{self, ErrorKind, Write};

use crate::config::OutputFormat;
use crate::pipeline::LookupOutcome;
use crate::whois::Record;

pub use self::csv::{csv_row, CsvExporter};
pub use self::jsonl::{outcome_to_json, JsonlExporter};

/// Writer that treats a closed downstream pipe (`| head`) as success.
pub struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Exporter selected by [`OutputFormat`].
pub enum OutcomeExporter<W: Write> {
    Csv(CsvExporter<W>),
    Jsonl(JsonlExporter<W>),
}

impl<W: Write> OutcomeExporter<W> {
    /// # Errors
    ///
    /// Fails when the CSV header cannot be written.
    pub fn new(format: OutputFormat, output: W) -> Result<Self> {
        Ok(match format {
            OutputFormat::Csv => OutcomeExporter::Csv(CsvExporter::new(output)?),
            OutputFormat::Jsonl => OutcomeExporter::Jsonl(JsonlExporter::new(output)),
        })
    }

    pub fn write(&mut self, outcome: &LookupOutcome) -> Result<()> {
        match self {
            OutcomeExporter::Csv(exporter) => exporter.write(outcome),
            OutcomeExporter::Jsonl(exporter) => exporter.write(outcome),
        }
    }
}

/// First country found walking from `record` towards the root.
pub(crate) fn country_of(record: &Record) -> &str {
    record
        .chain()
        .map(|r| r.country.as_str())
        .find(|c| !c.is_empty())
        .unwrap_or("")
}
