//! Init command implementation
//!
//! Writes a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "chomp.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your date range and fields", self.output);
                println!("  2. Export SENDGRID_API_KEY or put it in a .env file");
                println!("  3. Validate configuration: chomp-sendgrid validate-config");
                println!("  4. Run extract: chomp-sendgrid extract");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# chomp-sendgrid configuration

[application]
log_level = "info"

[source]
top-level-api = "stats"
start-date = "2018-07-21"
end-date = "2018-08-20"
fields = ["requests", "delivered", "unique_opens"]

[credentials]
api-key = "${SENDGRID_API_KEY}"

[api]
base_url = "https://api.sendgrid.com/v3"
timeout_seconds = 30
# "error" fails the page when a field is missing for a day; "zero" writes 0
missing_metric = "error"

[output]
directory = "."
extract_name = "sendgrid_stats"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
    }
}
