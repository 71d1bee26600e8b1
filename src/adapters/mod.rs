//! External system integrations.
//!
//! - [`transport`] - The fetch seam ([`transport::Transport`]) and its HTTP
//!   implementation
//! - [`sendgrid`] - Stats endpoint request building and response models
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies so the extraction core can be
//! driven by a mock transport in tests:
//!
//! ```rust,no_run
//! use chomp_sendgrid::adapters::transport::{FetchRequest, HttpTransport, Transport};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(Duration::from_secs(30))?;
//! let request = FetchRequest::new("https://api.sendgrid.com/v3/stats".parse()?);
//! let body = transport.fetch(&request).await?;
//! # Ok(())
//! # }
//! ```

pub mod sendgrid;
pub mod transport;

pub use transport::{FetchRequest, HttpTransport, Transport};
