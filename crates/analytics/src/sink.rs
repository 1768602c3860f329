//! Record destinations.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::RoundRecord;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("analytics i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("analytics record could not be encoded: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

pub trait AnalyticsSink {
    fn record(&mut self, record: &RoundRecord) -> AnalyticsResult<()>;

    fn flush(&mut self) -> AnalyticsResult<()> {
        Ok(())
    }
}

/// Line-delimited JSON: one record object per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Records written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Append to `path`, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "analytics file opened");
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> AnalyticsSink for JsonLinesSink<W> {
    fn record(&mut self, record: &RoundRecord) -> AnalyticsResult<()> {
        let line = serde_json::to_string(record)?;
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    fn flush(&mut self) -> AnalyticsResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<RoundRecord>,
}

impl MemorySink {
    pub fn records(&self) -> &[RoundRecord] {
        &self.records
    }
}

impl AnalyticsSink for MemorySink {
    fn record(&mut self, record: &RoundRecord) -> AnalyticsResult<()> {
        self.records.push(record.clone());
        Ok(())
    }
}
