//! JSONL rendering of lookup outcomes.
//!
//! Each line is one JSON object per address, with the referral chain from the
//! most specific server to the root. Handy for piping into `jq`.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::io::Write;

use crate::pipeline::LookupOutcome;
use crate::whois::HopSummary;

use super::country_of;

/// Streams outcomes as JSON lines.
pub struct JsonlExporter<W: Write> {
    output: W,
}

impl<W: Write> JsonlExporter<W> {
    pub fn new(output: W) -> Self {
        Self { output }
    }

    pub fn write(&mut self, outcome: &LookupOutcome) -> Result<()> {
        let line = serde_json::to_string(&outcome_to_json(outcome))
            .context("Failed to serialize outcome")?;
        writeln!(self.output, "{}", line)
            .with_context(|| format!("Failed to write JSON line for {}", outcome.address))?;
        self.output.flush().context("Failed to flush JSONL output")?;
        Ok(())
    }
}

/// JSON object describing `outcome`.
pub fn outcome_to_json(outcome: &LookupOutcome) -> Value {
    match &outcome.result {
        Ok(record) => {
            let chain: Vec<HopSummary<'_>> = record.chain().map(HopSummary::from).collect();
            json!({
                "address": outcome.address,
                "organization": record.display_name(),
                "country": country_of(record),
                "server": record.server,
                "recurse_error": record.recurse_error.as_ref().map(|e| e.to_string()),
                "error": Value::Null,
                "chain": chain,
            })
        }
        Err(e) => json!({
            "address": outcome.address,
            "organization": "",
            "country": "",
            "server": Value::Null,
            "recurse_error": Value::Null,
            "error": e.to_string(),
            "chain": [],
        }),
    }
}
