//! Integration tests for configuration loading and source validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use chomp_sendgrid::config::{load_config, validate, ApiKind, MissingMetricPolicy};
use chomp_sendgrid::domain::ValidationError;
use chrono::NaiveDate;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("CHOMP_APPLICATION_LOG_LEVEL");
    std::env::remove_var("CHOMP_API_BASE_URL");
    std::env::remove_var("CHOMP_API_TIMEOUT_SECONDS");
    std::env::remove_var("CHOMP_OUTPUT_DIRECTORY");
    std::env::remove_var("TEST_SENDGRID_API_KEY");
}

fn write_config(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[source]
top-level-api = "stats"
start-date = "2018-07-21"
end-date = "2018-08-20"
fields = ["requests", "delivered", "unique_opens"]

[credentials]
api-key = "SG.complete"

[api]
base_url = "https://api.sendgrid.example/v3"
timeout_seconds = 45
missing_metric = "zero"

[output]
directory = "/tmp/chomp"
extract_name = "daily"

[logging]
local_enabled = true
local_path = "/tmp/chomp/logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.credentials.api_key.expose_secret().as_ref(), "SG.complete");
    assert_eq!(config.api.base_url, "https://api.sendgrid.example/v3");
    assert_eq!(config.api.timeout_seconds, 45);
    assert_eq!(config.api.missing_metric, MissingMetricPolicy::Zero);
    assert_eq!(config.output.directory, "/tmp/chomp");
    assert_eq!(config.output.extract_name, "daily");
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");

    let source = validate(&config.source).unwrap();
    assert_eq!(source.api_kind, ApiKind::Stats);
    assert_eq!(source.start_date, NaiveDate::from_ymd_opt(2018, 7, 21).unwrap());
    assert_eq!(source.end_date, NaiveDate::from_ymd_opt(2018, 8, 20).unwrap());
    assert_eq!(
        source.fields.as_deref(),
        Some(&["requests".to_string(), "delivered".into(), "unique_opens".into()][..])
    );
}

#[test]
fn test_load_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
top-level-api = "stats"
start-date = "2018-07-01"
end-date = "2018-07-31"

[credentials]
api-key = "SG.minimal"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.api.base_url, "https://api.sendgrid.com/v3");
    assert_eq!(config.api.timeout_seconds, 30);
    assert_eq!(config.api.missing_metric, MissingMetricPolicy::Error);
    assert_eq!(config.output.directory, ".");
    assert_eq!(config.output.extract_name, "sendgrid_stats");
    assert!(!config.logging.local_enabled);

    // Missing fields is not a validation failure
    let source = validate(&config.source).unwrap();
    assert!(source.fields.is_none());
}

#[test]
fn test_api_key_from_environment() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_SENDGRID_API_KEY", "SG.from-env");

    let temp_file = write_config(
        r#"
[source]
top-level-api = "stats"
start-date = "2018-07-01"
end-date = "2018-07-31"

[credentials]
# api-key = "${UNSET_IN_A_COMMENT}"
api-key = "${TEST_SENDGRID_API_KEY}"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.credentials.api_key.expose_secret().as_ref(), "SG.from-env");

    cleanup_env_vars();
}

#[test]
fn test_missing_environment_variable_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
top-level-api = "stats"

[credentials]
api-key = "${TEST_SENDGRID_API_KEY}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_SENDGRID_API_KEY"));
}

#[test]
fn test_environment_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("CHOMP_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("CHOMP_API_BASE_URL", "http://localhost:9000/v3");
    std::env::set_var("CHOMP_API_TIMEOUT_SECONDS", "5");
    std::env::set_var("CHOMP_OUTPUT_DIRECTORY", "/var/chomp");

    let temp_file = write_config(
        r#"
[source]
top-level-api = "stats"

[credentials]
api-key = "SG.override"

[api]
timeout_seconds = 60
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "warn");
    assert_eq!(config.api.base_url, "http://localhost:9000/v3");
    assert_eq!(config.api.timeout_seconds, 5);
    assert_eq!(config.output.directory, "/var/chomp");

    cleanup_env_vars();
}

#[test]
fn test_invalid_typed_section_is_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
top-level-api = "stats"

[credentials]
api-key = "SG.timeout"

[api]
timeout_seconds = 0
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("timeout_seconds"));
}

#[test]
fn test_source_errors_surface_after_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[source]
top-level-api = "stats"
start-date = "07/21/2018"
end-date = "2018-08-20"

[credentials]
api-key = "SG.dates"
"#,
    );

    // The source table is only checked when validated explicitly
    let config = load_config(temp_file.path()).unwrap();
    let err = validate(&config.source).unwrap_err();
    assert_eq!(err, ValidationError::InvalidDateFormat("start_date"));
    assert_eq!(err.to_string(), "invalid start_date");
}

#[test]
fn test_nonexistent_config_file() {
    let err = load_config("/nonexistent/chomp.toml").unwrap_err();
    assert!(err.to_string().contains("not found"));
}
