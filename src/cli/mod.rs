//! CLI interface and argument parsing

pub mod commands;

use clap::{Parser, Subcommand};

/// Chomp - SendGrid daily stats extractor
#[derive(Parser, Debug)]
#[command(name = "chomp-sendgrid")]
#[command(version, about, long_about = None)]
#[command(author = "Chomp Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "chomp.toml", env = "CHOMP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CHOMP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract daily stats to CSV
    Extract(commands::extract::ExtractArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Write a sample configuration file
    Init(commands::init::InitArgs),
}
