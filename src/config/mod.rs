//! Configuration management for ga4-export.
//!
//! Configuration is a TOML file with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `GA4_<SECTION>_<KEY>` environment overrides
//! - Defaults that reproduce the stock two-batch report
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [credentials]
//! key_file = "key.json"
//!
//! [report]
//! dimensions = ["date"]
//! metric_batches = [
//!     ["engagementRate", "activeUsers", "newUsers"],
//!     ["screenPageViews", "purchaseRevenue"],
//! ]
//!
//! [report.date_range]
//! start = "2024-01-01"
//! end = "2024-01-30"
//!
//! [properties]
//! "123456789" = "Smarty-Jacket"
//!
//! [output]
//! directory = "exports"
//! formats = ["xlsx", "csv", "json"]
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use ga4_export::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ga4.toml")?;
//! println!("Properties: {}", config.properties.len());
//! # Ok(())
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config, parse_formats};
pub use schema::{
    ApiConfig, ApplicationConfig, CredentialsConfig, Ga4Config, LoggingConfig, OutputConfig,
    ReportConfig, ServerConfig,
};
pub use secret::{expose_owned, secret_string, SecretString, SecretValue};
