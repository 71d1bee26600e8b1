//! Stats API wire models
//!
//! Response body shape:
//!
//! ```json
//! [
//!   {"date": "2018-07-21", "stats": [{"metrics": {"requests": 20, "delivered": 10}}]},
//!   ...
//! ]
//! ```
//!
//! Only `stats[0].metrics` is read. Other keys and further `stats` entries
//! are ignored.

use crate::domain::{DayRecord, Metrics, TransportError};
use chrono::NaiveDate;
use serde::Deserialize;

/// One element of the response array
#[derive(Debug, Deserialize)]
pub struct StatsDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub stats: Vec<StatsEntry>,
}

/// One entry of a day's `stats` array
#[derive(Debug, Deserialize)]
pub struct StatsEntry {
    #[serde(default)]
    pub metrics: Metrics,
}

impl From<StatsDay> for DayRecord {
    fn from(day: StatsDay) -> Self {
        // A day with an empty `stats` array projects as if it had no metrics
        let metrics = day
            .stats
            .into_iter()
            .next()
            .map(|entry| entry.metrics)
            .unwrap_or_default();
        DayRecord::new(day.date, metrics)
    }
}

/// Parse a response body into day records, preserving response order
///
/// # Errors
///
/// Returns [`TransportError::MalformedBody`] if the body is not UTF-8 JSON of
/// the expected shape.
pub fn parse_day_records(body: &[u8]) -> Result<Vec<DayRecord>, TransportError> {
    let days: Vec<StatsDay> =
        serde_json::from_slice(body).map_err(|e| TransportError::MalformedBody(e.to_string()))?;
    Ok(days.into_iter().map(DayRecord::from).collect())
}
