//! Domain models and types.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Stats values** ([`DayRecord`], [`Metrics`], [`Row`])
//! - **Error types** ([`ChompError`], [`ValidationError`], [`TransportError`],
//!   [`ProjectionError`], [`CursorError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, ChompError>`]:
//!
//! ```rust
//! use chomp_sendgrid::domain::{ChompError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = chomp_sendgrid::config::load_config("chomp.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod result;
pub mod stats;

pub use errors::{ChompError, CursorError, ProjectionError, TransportError, ValidationError};
pub use result::Result;
pub use stats::{DayRecord, Metrics, Row};
