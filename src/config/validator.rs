//! Source configuration validation
//!
//! The `[source]` section is kept as a raw TOML table and checked here rather
//! than by serde, because the order in which problems are reported is part of
//! the contract: the first failing check wins and only that error surfaces.
//!
//! Checks run in this order:
//!
//! 1. `top-level-api` present, else `missing api_kind`
//! 2. `top-level-api` is a supported kind, else `unsupported api_kind`
//! 3. `start-date` present, else `missing start_date`
//! 4. `start-date` is a `YYYY-MM-DD` date, else `invalid start_date`
//! 5. `end-date` present, else `missing end_date`
//! 6. `end-date` is a `YYYY-MM-DD` date, else `invalid end_date`
//!
//! `fields` is not validated.

use crate::domain::ValidationError;
use chrono::NaiveDate;
use std::fmt;
use toml::{Table, Value};

/// Raw `[source]` mapping as read from the configuration file
pub type SourceTable = Table;

pub const KEY_API_KIND: &str = "top-level-api";
pub const KEY_START_DATE: &str = "start-date";
pub const KEY_END_DATE: &str = "end-date";
pub const KEY_FIELDS: &str = "fields";

/// Remote API family to extract from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKind {
    /// Global daily email statistics
    Stats,
}

impl ApiKind {
    /// Parse a configuration value into a supported kind
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "stats" => Some(ApiKind::Stats),
            _ => None,
        }
    }

    /// Path segment of the endpoint serving this kind
    pub fn path(&self) -> &'static str {
        match self {
            ApiKind::Stats => "stats",
        }
    }
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Source configuration that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub api_kind: ApiKind,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Metric names in output order; `None` when `fields` is absent or is not
    /// a list of strings
    pub fields: Option<Vec<String>>,
}

/// One ordered validation step: the key it reads, the name used in error
/// messages, the predicate applied to a present value, and the error raised
/// when the predicate rejects it
struct Rule {
    key: &'static str,
    name: &'static str,
    accepts: fn(&Value) -> bool,
    rejected: fn(&'static str) -> ValidationError,
}

const RULES: [Rule; 3] = [
    Rule {
        key: KEY_API_KIND,
        name: "api_kind",
        accepts: is_api_kind,
        rejected: ValidationError::InvalidEnum,
    },
    Rule {
        key: KEY_START_DATE,
        name: "start_date",
        accepts: is_date,
        rejected: ValidationError::InvalidDateFormat,
    },
    Rule {
        key: KEY_END_DATE,
        name: "end_date",
        accepts: is_date,
        rejected: ValidationError::InvalidDateFormat,
    },
];

fn is_api_kind(value: &Value) -> bool {
    api_kind_of(value).is_some()
}

fn is_date(value: &Value) -> bool {
    date_of(value).is_some()
}

fn api_kind_of(value: &Value) -> Option<ApiKind> {
    value.as_str().and_then(ApiKind::parse)
}

/// Accepts a `YYYY-MM-DD` string or a bare TOML local date
fn date_of(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => parse_iso_date(s),
        Value::Datetime(dt) if dt.time.is_none() && dt.offset.is_none() => {
            let date = dt.date?;
            NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
        }
        _ => None,
    }
}

/// Parse a strict ISO calendar date (`2018-07-01`, not `2018-7-1`)
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if s.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn fields_of(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Run every check in order, stopping at the first failure
fn check(raw: &SourceTable) -> Result<(), ValidationError> {
    for rule in &RULES {
        let value = raw
            .get(rule.key)
            .ok_or(ValidationError::MissingKey(rule.name))?;
        if !(rule.accepts)(value) {
            return Err((rule.rejected)(rule.name));
        }
    }
    Ok(())
}

/// Validate a raw source mapping into a typed configuration
///
/// No side effects. Returns the first failing check's error.
///
/// # Example
///
/// ```
/// use chomp_sendgrid::config::validator::{validate, SourceTable};
///
/// let raw: SourceTable = toml::from_str(r#"top-level-api = "stats""#).unwrap();
/// let err = validate(&raw).unwrap_err();
/// assert_eq!(err.to_string(), "missing start_date");
/// ```
pub fn validate(raw: &SourceTable) -> Result<ValidatedConfig, ValidationError> {
    check(raw)?;

    let api_kind = raw
        .get(KEY_API_KIND)
        .and_then(api_kind_of)
        .ok_or(ValidationError::InvalidEnum("api_kind"))?;
    let start_date = raw
        .get(KEY_START_DATE)
        .and_then(date_of)
        .ok_or(ValidationError::InvalidDateFormat("start_date"))?;
    let end_date = raw
        .get(KEY_END_DATE)
        .and_then(date_of)
        .ok_or(ValidationError::InvalidDateFormat("end_date"))?;
    let fields = raw.get(KEY_FIELDS).and_then(fields_of);

    Ok(ValidatedConfig {
        api_kind,
        start_date,
        end_date,
        fields,
    })
}
