//! Validate config command implementation

use crate::config::{load_config, Ga4Config};
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

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        print_config_summary(&config);
        Ok(0)
    }
}

fn print_config_summary(config: &Ga4Config) {
    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    match (&config.credentials.key_file, &config.credentials.access_token) {
        (_, Some(_)) => println!("  Credentials: static access token"),
        (Some(path), None) => println!("  Credentials: service-account key file {path}"),
        (None, None) => println!("  Credentials: none"),
    }
    println!("  API: {}", config.api.base_url);
    println!("  Dimensions: {:?}", config.report.dimensions);
    println!(
        "  Join Key: {}",
        config
            .report
            .dimensions
            .get(config.report.join_key_index)
            .map(String::as_str)
            .unwrap_or("-")
    );
    for (i, batch) in config.report.metric_batches.iter().enumerate() {
        println!("  Metric Batch {}: {} metric(s)", i + 1, batch.len());
    }
    println!("  Date Range: {}", config.report.date_range);
    println!("  Properties:");
    for (id, name) in &config.properties {
        println!("    {id} -> {name}");
    }
    let formats: Vec<String> = config.output.formats.iter().map(ToString::to_string).collect();
    println!("  Output: {} ({})", config.output.directory, formats.join(", "));
    println!("  Server: {}", config.server.bind_address());
    println!();
}
