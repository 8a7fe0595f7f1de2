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
    #[arg(short, long, default_value = "ga4.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing ga4-export configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Put your service-account key at key.json (or set credentials.key_file)");
                println!("  2. List your properties under [properties] in {}", self.output);
                println!("  3. Validate configuration: ga4-export validate-config");
                println!("  4. Run once: ga4-export run");
                println!("     or serve: ga4-export serve");
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

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# ga4-export configuration

[credentials]
key_file = "key.json"

[report.date_range]
start = "2024-01-01"
end = "2024-01-30"

# Property id -> output file basename
[properties]
"123456789" = "Smarty-Jacket"

[output]
directory = "."
formats = ["xlsx", "csv"]
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# ga4-export configuration
#
# Every section except [properties] is optional; the values below are the
# defaults. Any value may reference an environment variable as ${NAME}, and
# GA4_<SECTION>_<KEY> variables override the file (e.g. GA4_OUTPUT_DIRECTORY).

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Credentials
# ============================================================================
[credentials]
# Service-account key file (JSON downloaded from the cloud console)
key_file = "key.json"

# Alternative: a pre-issued OAuth access token. Remove key_file when using it.
# access_token = "${GA4_ACCESS_TOKEN}"

# OAuth scope requested with the service-account key
scope = "https://www.googleapis.com/auth/analytics.readonly"

# ============================================================================
# Reporting API
# ============================================================================
[api]
base_url = "https://analyticsdata.googleapis.com"

# Transport timeout per request, in seconds
timeout_seconds = 60

# Maximum metrics in one report request
max_metrics_per_request = 10

# ============================================================================
# Report Definition
# ============================================================================
[report]
# Dimensions in request order
dimensions = ["date"]

# Index into dimensions of the column the batches are joined on
join_key_index = 0

# Metric batches, fetched in order and merged per join key.
# When two batches share a metric name, the later batch wins.
metric_batches = [
    [
        "engagementRate",
        "dauPerMau",
        "activeUsers",
        "totalRevenue",
        "eventCount",
        "bounceRate",
        "newUsers",
        "sessionsPerUser",
        "totalAdRevenue",
        "crashFreeUsersRate",
    ],
    [
        "averageRevenuePerUser",
        "crashAffectedUsers",
        "dauPerWau",
        "grossPurchaseRevenue",
        "screenPageViewsPerUser",
        "purchaseRevenue",
        "userEngagementDuration",
        "screenPageViews",
    ],
]

# YYYY-MM-DD, today, yesterday or NdaysAgo
[report.date_range]
start = "2024-01-01"
end = "2024-01-30"

# ============================================================================
# Properties: property id -> output file basename
# ============================================================================
[properties]
"123456789" = "Smarty-Jacket"
"987654321" = "Screen-Cast"

# ============================================================================
# Output
# ============================================================================
[output]
directory = "."

# Any of xlsx, csv, json (newline-delimited)
formats = ["xlsx", "csv"]

# ============================================================================
# HTTP Server (ga4-export serve)
# ============================================================================
[server]
host = "127.0.0.1"
port = 8000

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to the console
local_enabled = false
local_path = "./logs"

# daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}
