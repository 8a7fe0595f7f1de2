//! Run command implementation
//!
//! Fetches, merges and exports every configured property once, then exits.

use crate::adapters::ga4::Ga4Client;
use crate::config::{load_config, parse_formats, Ga4Config};
use crate::core::pipeline::{ReportPipeline, RunSummary};
use crate::domain::ReportDate;
use crate::log_error_with_context;
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Property to export as ID=NAME (repeatable; replaces [properties])
    #[arg(short, long, value_name = "ID=NAME")]
    pub property: Vec<String>,

    /// Override report start date (YYYY-MM-DD, today, yesterday, NdaysAgo)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Override report end date
    #[arg(long)]
    pub end_date: Option<String>,

    /// Override output formats (comma-separated: xlsx,csv,json)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        if let Err(e) = self.apply_overrides(&mut config) {
            eprintln!("❌ Invalid command-line override: {e}");
            return Ok(2);
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("❌ Configuration validation failed: {e}");
            return Ok(2);
        }

        let client = match Ga4Client::from_config(&config) {
            Ok(c) => c,
            Err(e) => {
                log_error_with_context!(e, "Failed to initialize reporting client");
                eprintln!("❌ Failed to initialize reporting client: {e}");
                return Ok(e.exit_code());
            }
        };

        let property_count = config.properties.len();
        println!(
            "🚀 Fetching {} propert{}...",
            property_count,
            plural_y(property_count)
        );
        println!();

        let pipeline = match ReportPipeline::new(&config, Arc::new(client)) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };
        match pipeline.run().await {
            Ok(summary) => {
                print_summary(&summary);
                println!("✅ Data fetched and processed successfully");
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Run failed: {e}");
                Ok(e.exit_code())
            }
        }
    }

    fn apply_overrides(&self, config: &mut Ga4Config) -> Result<(), String> {
        if !self.property.is_empty() {
            let properties = parse_properties(&self.property)?;
            tracing::info!(properties = ?properties, "Overriding properties from CLI");
            config.properties = properties;
        }

        if let Some(start) = &self.start_date {
            config.report.date_range.start = start.parse::<ReportDate>()?;
        }
        if let Some(end) = &self.end_date {
            config.report.date_range.end = end.parse::<ReportDate>()?;
        }

        if let Some(formats) = &self.format {
            config.output.formats = parse_formats(formats)?;
        }

        if let Some(dir) = &self.output_dir {
            tracing::info!(output_dir = %dir, "Overriding output directory from CLI");
            config.output.directory = dir.clone();
        }

        Ok(())
    }
}

/// Parses `ID=NAME` pairs
fn parse_properties(values: &[String]) -> Result<BTreeMap<String, String>, String> {
    values
        .iter()
        .map(|value| {
            value
                .split_once('=')
                .map(|(id, name)| (id.trim().to_string(), name.trim().to_string()))
                .filter(|(id, name)| !id.is_empty() && !name.is_empty())
                .ok_or_else(|| format!("expected ID=NAME, got '{value}'"))
        })
        .collect()
}

fn plural_y(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}

fn print_summary(summary: &RunSummary) {
    println!("📊 Run Summary:");
    for property in &summary.properties {
        println!(
            "  {} -> {}: {} rows x {} columns, {} batch(es), {:.2}s",
            property.property_id,
            property.output_name,
            property.rows,
            property.columns,
            property.batches,
            property.duration.as_secs_f64()
        );
        for file in &property.files {
            println!("    {}", file.display());
        }
    }
    println!("  Total rows: {}", summary.total_rows());
    println!("  Files written: {}", summary.total_files());
    println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::domain::OutputFormat;

    fn args() -> RunArgs {
        RunArgs {
            property: vec![],
            start_date: None,
            end_date: None,
            format: None,
            output_dir: None,
        }
    }

    fn config() -> Ga4Config {
        parse_config("[properties]\n\"1\" = \"one\"\n").unwrap()
    }

    #[test]
    fn test_parse_properties() {
        let parsed =
            parse_properties(&["123=Smarty-Jacket".to_string(), " 456 = Screen-Cast".to_string()])
                .unwrap();
        assert_eq!(parsed.get("123").map(String::as_str), Some("Smarty-Jacket"));
        assert_eq!(parsed.get("456").map(String::as_str), Some("Screen-Cast"));

        assert!(parse_properties(&["123".to_string()]).is_err());
        assert!(parse_properties(&["=name".to_string()]).is_err());
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = config();
        args().apply_overrides(&mut config).unwrap();
        assert_eq!(config.properties.len(), 1);
        assert_eq!(config.output.directory, ".");
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = config();
        let args = RunArgs {
            property: vec!["9=nine".to_string()],
            start_date: Some("30daysAgo".to_string()),
            end_date: Some("yesterday".to_string()),
            format: Some("json".to_string()),
            output_dir: Some("/tmp/ga4-out".to_string()),
        };

        args.apply_overrides(&mut config).unwrap();

        assert_eq!(config.properties.keys().collect::<Vec<_>>(), vec!["9"]);
        assert_eq!(config.report.date_range.start, ReportDate::DaysAgo(30));
        assert_eq!(config.report.date_range.end, ReportDate::Yesterday);
        assert_eq!(config.output.formats.len(), 1);
        assert!(config.output.formats.contains(&OutputFormat::Json));
        assert_eq!(config.output.directory, "/tmp/ga4-out");
    }

    #[test]
    fn test_bad_date_override_rejected() {
        let mut config = config();
        let args = RunArgs {
            start_date: Some("last week".to_string()),
            ..self::args()
        };
        assert!(args.apply_overrides(&mut config).is_err());
    }
}
