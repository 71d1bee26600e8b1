//! SendGrid stats adapter
//!
//! Request construction for the stats endpoint and the wire models of its
//! JSON response.

pub mod models;
pub mod request;

pub use models::{parse_day_records, StatsDay, StatsEntry};
pub use request::StatsRequestBuilder;
