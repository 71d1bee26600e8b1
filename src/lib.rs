// Chomp - SendGrid daily stats extractor
// Copyright (c) 2025 Chomp Contributors
// Licensed under the MIT License

//! # Chomp - SendGrid daily stats extractor
//!
//! Extracts daily email-engagement statistics from the SendGrid stats API
//! over an arbitrary date range, one page of days at a time, and turns each
//! day into a fixed-field row.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Pagination, cursor, projection, extraction and CSV output
//! - [`adapters`] - Fetch transport and stats API wire models
//! - [`domain`] - Value types and errors
//! - [`config`] - Configuration loading and source validation
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chomp_sendgrid::adapters::HttpTransport;
//! use chomp_sendgrid::config::load_config;
//! use chomp_sendgrid::core::{output_path, CsvSink, Extractor};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("chomp.toml")?;
//!     let transport = Arc::new(HttpTransport::new(Duration::from_secs(30))?);
//!     let mut extractor = Extractor::from_config(&config, transport)?;
//!
//!     let mut sink = CsvSink::create(&output_path(&config.output))?;
//!     while !extractor.is_exhausted() {
//!         sink.write_rows(&extractor.get_next_batch().await?)?;
//!     }
//!     let (_, rows) = sink.finish()?;
//!     println!("Wrote {rows} rows");
//!     Ok(())
//! }
//! ```
//!
//! ## Pagination
//!
//! The range is split into windows of [`core::PAGE_SIZE_DAYS`] days. Each
//! call to [`core::Extractor::get_next_batch`] fetches exactly one window and
//! returns its rows; once every window has been fetched, calls return an
//! empty list. A failed call leaves the cursor in place, so calling again
//! retries the same window.
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::ChompError`]. Source validation errors keep their exact text:
//!
//! ```rust
//! use chomp_sendgrid::config::{validate, SourceTable};
//!
//! let err = validate(&SourceTable::new()).unwrap_err();
//! assert_eq!(err.to_string(), "missing api_kind");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
