//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ChompConfig;
use crate::domain::errors::ChompError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`ChompConfig`]
/// 4. Applies environment variable overrides (`CHOMP_*` prefix)
/// 5. Validates the typed sections
///
/// # Errors
///
/// Returns [`ChompError::Configuration`] if the file cannot be read or parsed,
/// a referenced variable is unset, or a typed section is invalid.
///
/// # Examples
///
/// ```no_run
/// use chomp_sendgrid::config::loader::load_config;
///
/// let config = load_config("chomp.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ChompConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ChompError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ChompError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ChompConfig = toml::from_str(&contents)
        .map_err(|e| ChompError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ChompError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ChompError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ChompError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `CHOMP_*` prefix
///
/// Environment variables follow the pattern `CHOMP_<SECTION>_<KEY>`, for
/// example `CHOMP_API_BASE_URL` or `CHOMP_OUTPUT_DIRECTORY`.
fn apply_env_overrides(config: &mut ChompConfig) {
    if let Ok(val) = std::env::var("CHOMP_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("CHOMP_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("CHOMP_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.api.timeout_seconds = timeout;
        }
    }

    if let Ok(val) = std::env::var("CHOMP_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Ok(val) = std::env::var("CHOMP_OUTPUT_EXTRACT_NAME") {
        config.output.extract_name = val;
    }

    if let Ok(val) = std::env::var("CHOMP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CHOMP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CHOMP_LOADER_TEST_KEY", "SG.from-env");
        let input = "api-key = \"${CHOMP_LOADER_TEST_KEY}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api-key = \"SG.from-env\"\n");
        std::env::remove_var("CHOMP_LOADER_TEST_KEY");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CHOMP_LOADER_MISSING_VAR");
        let input = "api-key = \"${CHOMP_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CHOMP_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("CHOMP_LOADER_COMMENTED");
        let input = "# api-key = \"${CHOMP_LOADER_COMMENTED}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-chomp.toml");
        assert!(matches!(result, Err(ChompError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[source]
top-level-api = "stats"
start-date = "2018-07-21"
end-date = "2018-08-20"
fields = ["requests", "delivered", "unique_opens"]

[credentials]
api-key = "SG.file"

[output]
directory = "/tmp"
extract_name = "stats"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.credentials.api_key.expose_secret().as_ref(), "SG.file");
        assert_eq!(config.output.extract_name, "stats");
        assert!(config.source.contains_key("fields"));
    }

    #[test]
    fn test_load_config_missing_credentials() {
        let toml_content = r#"
[source]
top-level-api = "stats"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let err = load_config(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }
}
