//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console output on stderr
//! - Optional JSON file output with daily or hourly rotation
//! - `RUST_LOG` overrides the configured level
//!
//! The API key is never recorded as a log field.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
