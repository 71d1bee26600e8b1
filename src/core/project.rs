//! Day record to row projection

use crate::config::MissingMetricPolicy;
use crate::domain::{DayRecord, ProjectionError, Row};
use serde_json::Number;

/// Projects day records onto a caller-chosen field order
///
/// The output order follows `fields`, never the key order of the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowProjector {
    policy: MissingMetricPolicy,
}

impl RowProjector {
    /// Create a projector with the given missing-metric policy
    pub fn new(policy: MissingMetricPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MissingMetricPolicy {
        self.policy
    }

    /// Project one record into `(date, fields[0], fields[1], ...)`
    ///
    /// # Errors
    ///
    /// With [`MissingMetricPolicy::Error`], returns
    /// [`ProjectionError::MissingField`] for the first field the record lacks.
    pub fn project(&self, record: &DayRecord, fields: &[String]) -> Result<Row, ProjectionError> {
        let values = fields
            .iter()
            .map(|field| match (record.metrics.get(field), self.policy) {
                (Some(value), _) => Ok(value.clone()),
                (None, MissingMetricPolicy::Zero) => {
                    tracing::debug!(date = %record.date, field = %field, "Metric missing, using zero");
                    Ok(Number::from(0))
                }
                (None, MissingMetricPolicy::Error) => Err(ProjectionError::MissingField {
                    date: record.date,
                    field: field.clone(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Row::new(record.date, values))
    }
}
