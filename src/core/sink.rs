//! CSV output for extracted rows
//!
//! Rows are written without a header, one record per row: the date quoted,
//! metric values bare.

use crate::config::OutputConfig;
use crate::domain::{ChompError, Result, Row};
use csv::{QuoteStyle, Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Resolve `{directory}/{extract_name}.csv`, expanding a leading `~`
pub fn output_path(config: &OutputConfig) -> PathBuf {
    expand_home(&config.directory).join(format!("{}.csv", config.extract_name))
}

fn expand_home(dir: &str) -> PathBuf {
    match dir.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(dir),
        },
        _ => PathBuf::from(dir),
    }
}

/// Row writer over any `Write`
pub struct CsvSink<W: Write> {
    writer: Writer<W>,
    rows_written: u64,
}

impl CsvSink<BufWriter<File>> {
    /// Create or truncate the file at `path`
    ///
    /// # Errors
    ///
    /// Returns [`ChompError::Output`] if the file cannot be created
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            ChompError::Output(format!("Failed to create {}: {}", path.display(), e))
        })?;
        tracing::info!(path = %path.display(), "Writing CSV output");
        Ok(Self::from_writer(BufWriter::with_capacity(
            DEFAULT_BUFFER_SIZE,
            file,
        )))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap an existing writer
    pub fn from_writer(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::NonNumeric)
            .from_writer(inner);
        Self {
            writer,
            rows_written: 0,
        }
    }

    /// Append rows in order
    pub fn write_rows(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            let mut record = Vec::with_capacity(row.width());
            record.push(row.date.format("%Y-%m-%d").to_string());
            record.extend(row.values.iter().map(|v| v.to_string()));
            self.writer.write_record(&record)?;
            self.rows_written += 1;
        }
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Flush and hand back the inner writer with the row count
    pub fn finish(self) -> Result<(W, u64)> {
        let rows = self.rows_written;
        let inner = self
            .writer
            .into_inner()
            .map_err(|e| ChompError::Output(format!("Failed to flush CSV output: {}", e.error())))?;
        tracing::debug!(rows, "CSV output flushed");
        Ok((inner, rows))
    }
}
