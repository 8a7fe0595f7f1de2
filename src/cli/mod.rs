//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ga4-export using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ga4-export - GA4 report batch fetch, merge and export
#[derive(Parser, Debug)]
#[command(name = "ga4-export")]
#[command(version, about, long_about = None)]
#[command(author = "ga4-export Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ga4.toml", env = "GA4_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "GA4_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, merge and export every configured property once
    Run(commands::run::RunArgs),

    /// Serve the HTTP trigger endpoint
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
