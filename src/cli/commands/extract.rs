//! Extract command implementation
//!
//! Drains an [`Extractor`] page by page into a CSV file.

use crate::adapters::HttpTransport;
use crate::config::validator::{KEY_END_DATE, KEY_FIELDS, KEY_START_DATE};
use crate::config::{load_config, SourceTable};
use crate::core::{output_path, CsvSink, Extractor};
use crate::domain::ChompError;
use clap::Args;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;
use toml::Value;

/// Arguments for the extract command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Override the first day to extract (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Override the last day to extract (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    /// Override the metric fields (comma-separated, in output order)
    #[arg(long)]
    pub fields: Option<String>,

    /// Override the output directory
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Print the page windows without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

impl ExtractArgs {
    /// Apply CLI overrides to the raw source mapping
    fn apply_overrides(&self, source: &mut SourceTable) {
        if let Some(start) = &self.start_date {
            tracing::info!(start_date = %start, "Overriding start date from CLI");
            source.insert(KEY_START_DATE.to_string(), Value::String(start.clone()));
        }

        if let Some(end) = &self.end_date {
            tracing::info!(end_date = %end, "Overriding end date from CLI");
            source.insert(KEY_END_DATE.to_string(), Value::String(end.clone()));
        }

        if let Some(fields) = &self.fields {
            let fields: Vec<Value> = fields
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(|f| Value::String(f.to_string()))
                .collect();
            tracing::info!(fields = ?fields, "Overriding fields from CLI");
            source.insert(KEY_FIELDS.to_string(), Value::Array(fields));
        }
    }

    /// Execute the extract command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting extract command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("{e}");
                return Ok(2);
            }
        };

        self.apply_overrides(&mut config.source);
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }

        let transport = Arc::new(HttpTransport::new(Duration::from_secs(
            config.api.timeout_seconds,
        ))?);
        let mut extractor = match Extractor::from_config(&config, transport) {
            Ok(extractor) => extractor,
            Err(e @ (ChompError::Validation(_) | ChompError::InvalidDateRange { .. })) => {
                tracing::error!(error = %e, "Invalid source configuration");
                eprintln!("Invalid source configuration: {e}");
                return Ok(2);
            }
            Err(e) => return Err(e.into()),
        };

        if self.dry_run {
            println!("🔍 DRY RUN MODE - no requests will be sent");
            println!();
            for (index, window) in extractor.windows().enumerate() {
                println!("  Page {:>3}: {} ({} days)", index + 1, window, window.days());
            }
            println!();
            println!("  Total pages: {}", extractor.total_pages());
            return Ok(0);
        }

        let path = output_path(&config.output);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut sink = CsvSink::create(&path)?;

        println!("🚀 Extracting {} page(s) to {}", extractor.total_pages(), path.display());

        let started = Instant::now();
        let mut interrupted = false;
        while !extractor.is_exhausted() {
            if *shutdown_signal.borrow() {
                interrupted = true;
                break;
            }
            let rows = extractor.get_next_batch().await?;
            sink.write_rows(&rows)?;
        }
        let (_, rows_written) = sink.finish()?;

        let cursor = extractor.cursor();
        println!();
        println!("📊 Extract Summary:");
        println!("  Pages: {}/{}", cursor.pages_fetched(), cursor.pages_total());
        println!("  Rows written: {rows_written}");
        println!("  Output: {}", path.display());
        println!("  Duration: {:.2}s", started.elapsed().as_secs_f64());
        println!();

        tracing::info!(
            pages = cursor.pages_fetched(),
            total_pages = cursor.pages_total(),
            rows = rows_written,
            interrupted,
            "Extract finished"
        );

        if interrupted {
            println!("⚠️  Extract interrupted after {} page(s).", cursor.pages_fetched());
            Ok(130)
        } else {
            println!("✅ Extract completed successfully!");
            Ok(0)
        }
    }
}
