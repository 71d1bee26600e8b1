//! Email statistics value types
//!
//! A [`DayRecord`] is one calendar day of metrics as returned by the stats
//! API. A [`Row`] is the projection of a day record onto the caller's field
//! order.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::collections::HashMap;

/// Mapping from metric name to numeric value for one day
///
/// Lookups return `Option` so that a metric the API omitted for a given day
/// is an explicit case for the caller to handle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metrics(HashMap<String, Number>);

impl Metrics {
    /// Look up a metric by name
    pub fn get(&self, name: &str) -> Option<&Number> {
        self.0.get(name)
    }

    /// Number of metrics present
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the day carries no metrics
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Number)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (K, Number)>>(iter: I) -> Self {
        Metrics(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// One calendar day of metrics
#[derive(Debug, Clone, PartialEq)]
pub struct DayRecord {
    /// Day the metrics cover
    pub date: NaiveDate,

    /// Metrics reported for the day
    pub metrics: Metrics,
}

impl DayRecord {
    /// Create a new day record
    pub fn new(date: NaiveDate, metrics: Metrics) -> Self {
        Self { date, metrics }
    }
}

/// Projected output row: the date followed by metric values in field order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Day the row covers
    pub date: NaiveDate,

    /// Metric values, one per configured field, in configured order
    pub values: Vec<Number>,
}

impl Row {
    /// Create a new row
    pub fn new(date: NaiveDate, values: Vec<Number>) -> Self {
        Self { date, values }
    }

    /// Number of cells including the leading date
    pub fn width(&self) -> usize {
        self.values.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_lookup() {
        let metrics: Metrics = [("delivered", Number::from(10)), ("requests", Number::from(20))]
            .into_iter()
            .collect();

        assert_eq!(metrics.get("delivered"), Some(&Number::from(10)));
        assert_eq!(metrics.get("bounces"), None);
        assert_eq!(metrics.len(), 2);
    }

    #[test]
    fn test_metrics_deserialize_from_json_object() {
        let metrics: Metrics =
            serde_json::from_str(r#"{"opens": 3, "unique_opens": 2}"#).unwrap();
        assert_eq!(metrics.get("opens"), Some(&Number::from(3)));
    }

    #[test]
    fn test_row_width_counts_date() {
        let date = NaiveDate::from_ymd_opt(2018, 7, 1).unwrap();
        assert_eq!(Row::new(date, vec![]).width(), 1);
        assert_eq!(Row::new(date, vec![Number::from(1), Number::from(2)]).width(), 3);
    }
}
