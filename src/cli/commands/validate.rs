//! Validate config command implementation

use crate::config::{load_config, validate};
use crate::core::DateRangePaginator;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let source = match validate(&config.source) {
            Ok(source) => source,
            Err(e) => {
                println!("❌ Source configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        if source.end_date < source.start_date {
            println!("❌ Source configuration is invalid");
            println!(
                "   Error: end date {} is before start date {}",
                source.end_date, source.start_date
            );
            println!();
            return Ok(2);
        }

        let pages = DateRangePaginator::new(source.start_date, source.end_date).total_pages();

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  API: {} ({})", source.api_kind, config.api.base_url);
        println!("  Date Range: {} to {}", source.start_date, source.end_date);
        println!("  Pages: {pages}");
        match &source.fields {
            Some(fields) => println!("  Fields: {fields:?}"),
            None => println!("  Fields: (not set)"),
        }
        println!("  Missing Metrics: {:?}", config.api.missing_metric);
        println!("  Output: {}", crate::core::output_path(&config.output).display());
        println!();
        Ok(0)
    }
}
