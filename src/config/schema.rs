//! Configuration schema types
//!
//! Maps the TOML configuration file onto typed sections. The `[source]`
//! section stays a raw table; it is checked by [`crate::config::validator`]
//! when an extractor is built.

use crate::config::validator::SourceTable;
use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ChompConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Raw source mapping (`top-level-api`, `start-date`, `end-date`, `fields`)
    pub source: SourceTable,

    /// API credentials
    pub credentials: Credentials,

    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ChompConfig {
    /// Validates the typed sections
    ///
    /// The source mapping is not checked here.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.credentials.validate()?;
        self.api.validate()?;
        self.output.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// API credentials
///
/// The key is only ever exposed when the authorization header is built.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Bearer token for the stats API
    #[serde(rename = "api-key")]
    pub api_key: SecretString,
}

impl Credentials {
    /// Create credentials from a plain key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: crate::config::secret_string(api_key.into()),
        }
    }

    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.api_key.expose_secret().is_empty() {
            return Err("credentials.api-key cannot be empty".to_string());
        }
        Ok(())
    }
}

/// What to do when a configured metric is absent from a day's record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMetricPolicy {
    /// Fail the batch with a projection error
    #[default]
    Error,
    /// Emit numeric zero for the missing metric
    Zero,
}

/// Remote API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL; the api kind's path is appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Handling of metrics missing from a day's record
    #[serde(default)]
    pub missing_metric: MissingMetricPolicy,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if !(1..=600).contains(&self.timeout_seconds) {
            return Err(format!(
                "api.timeout_seconds must be between 1 and 600, got {}",
                self.timeout_seconds
            ));
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            missing_metric: MissingMetricPolicy::default(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the CSV file is written to (`~` is expanded)
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// File stem of the CSV file
    #[serde(default = "default_extract_name")]
    pub extract_name: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }

        if self.extract_name.is_empty() {
            return Err("output.extract_name cannot be empty".to_string());
        }

        if self.extract_name.contains(['/', '\\']) {
            return Err(format!(
                "output.extract_name must be a bare file name, got '{}'",
                self.extract_name
            ));
        }

        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            extract_name: default_extract_name(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation strategy (daily, hourly)
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.is_empty() {
            return Err(
                "logging.local_path cannot be empty when local logging is enabled".to_string(),
            );
        }

        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.sendgrid.com/v3".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_extract_name() -> String {
    "sendgrid_stats".to_string()
}

fn default_log_path() -> String {
    "./logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[source]
top-level-api = "stats"
start-date = "2018-07-21"
end-date = "2018-08-20"

[credentials]
api-key = "SG.test"
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ChompConfig = toml::from_str(MINIMAL).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.api.base_url, "https://api.sendgrid.com/v3");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.api.missing_metric, MissingMetricPolicy::Error);
        assert_eq!(config.output.extract_name, "sendgrid_stats");
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_missing_metric_policy_parses() {
        let api: ApiConfig = toml::from_str(r#"missing_metric = "zero""#).unwrap();
        assert_eq!(api.missing_metric, MissingMetricPolicy::Zero);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config: ChompConfig = toml::from_str(MINIMAL).unwrap();
        config.application.log_level = "verbose".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Invalid log_level"));
    }

    #[test]
    fn test_base_url_scheme_required() {
        let mut config: ChompConfig = toml::from_str(MINIMAL).unwrap();
        config.api.base_url = "api.sendgrid.com/v3".to_string();
        assert!(config.validate().unwrap_err().contains("http://"));
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config: ChompConfig = toml::from_str(MINIMAL).unwrap();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let mut config: ChompConfig = toml::from_str(MINIMAL).unwrap();
        config.credentials = Credentials::new("");
        assert_eq!(
            config.validate().unwrap_err(),
            "credentials.api-key cannot be empty"
        );
    }

    #[test]
    fn test_extract_name_must_be_bare() {
        let mut config: ChompConfig = toml::from_str(MINIMAL).unwrap();
        config.output.extract_name = "../escape".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let config: ChompConfig = toml::from_str(MINIMAL).unwrap();
        assert!(!format!("{config:?}").contains("SG.test"));
    }
}
