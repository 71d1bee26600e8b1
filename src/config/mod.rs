//! Configuration management.
//!
//! # Overview
//!
//! Configuration is read from a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CHOMP_*` environment overrides for typed settings
//! - Default values for optional settings
//!
//! The `[source]` section is deliberately left untyped by serde and checked by
//! [`validator::validate`], which reports problems in a fixed order.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [source]
//! top-level-api = "stats"
//! start-date = "2018-07-21"
//! end-date = "2018-08-20"
//! fields = ["requests", "delivered", "unique_opens"]
//!
//! [credentials]
//! api-key = "${SENDGRID_API_KEY}"
//!
//! [api]
//! base_url = "https://api.sendgrid.com/v3"
//! timeout_seconds = 30
//! missing_metric = "error"
//!
//! [output]
//! directory = "~/extracts"
//! extract_name = "sendgrid_stats"
//! ```
//!
//! # Sections
//!
//! - [`ApplicationConfig`] - Log level
//! - [`Credentials`] - API key
//! - [`ApiConfig`] - Base URL, timeout, missing-metric policy
//! - [`OutputConfig`] - CSV destination
//! - [`LoggingConfig`] - File logging

pub mod loader;
pub mod schema;
pub mod secret;
pub mod validator;

pub use loader::load_config;
pub use schema::{
    ApiConfig, ApplicationConfig, ChompConfig, Credentials, LoggingConfig, MissingMetricPolicy,
    OutputConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
pub use validator::{validate, ApiKind, SourceTable, ValidatedConfig};
