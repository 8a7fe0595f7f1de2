//! Configuration schema types
//!
//! The root [`Ga4Config`] maps one-to-one onto the TOML file. Every section
//! except `[properties]` has defaults that reproduce the stock two-batch
//! report (see `default_metric_batches`).

use crate::config::SecretString;
use crate::domain::{
    DateRange, DimensionSet, MetricBatch, OutputFormat, OutputName, PropertyId, ReportDate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ga4Config {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Credential source for the reporting API
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Reporting API connection settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Metrics, dimensions and date range of the report
    #[serde(default)]
    pub report: ReportConfig,

    /// Property id -> output basename
    pub properties: BTreeMap<String, String>,

    /// Output location and formats
    #[serde(default)]
    pub output: OutputConfig,

    /// HTTP server settings (used by `serve`)
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Ga4Config {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid setting
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.credentials.validate()?;
        self.api.validate()?;
        self.report.validate(self.api.max_metrics_per_request)?;
        self.property_targets()?;
        self.output.validate()?;
        self.server.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Parsed `(property, output name)` pairs, in property id order
    ///
    /// Fails if the map is empty, an entry is malformed, or two properties
    /// share an output name (their files would overwrite each other).
    pub fn property_targets(&self) -> Result<Vec<(PropertyId, OutputName)>, String> {
        if self.properties.is_empty() {
            return Err("properties cannot be empty".to_string());
        }

        let mut seen = HashSet::new();
        let mut targets = Vec::with_capacity(self.properties.len());
        for (id, name) in &self.properties {
            let property_id = PropertyId::new(id.as_str())?;
            let output_name = OutputName::new(name.as_str())?;
            if !seen.insert(output_name.as_str().to_string()) {
                return Err(format!(
                    "Output name '{output_name}' is used by more than one property"
                ));
            }
            targets.push((property_id, output_name));
        }
        Ok(targets)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Credential source
///
/// Either a service-account key file (the default, `key.json`) or a
/// pre-issued OAuth access token. Setting both is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Path to a service-account JSON key file
    #[serde(default)]
    pub key_file: Option<String>,

    /// Pre-issued bearer token
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub access_token: Option<SecretString>,

    /// OAuth scope requested with the service-account grant
    #[serde(default = "default_scope")]
    pub scope: String,
}

impl CredentialsConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        match (&self.key_file, &self.access_token) {
            (Some(_), Some(_)) => Err(
                "credentials.key_file and credentials.access_token are mutually exclusive"
                    .to_string(),
            ),
            (None, None) => Err(
                "credentials require either key_file or access_token".to_string(),
            ),
            (Some(path), None) if path.trim().is_empty() => {
                Err("credentials.key_file cannot be empty".to_string())
            }
            (None, Some(token)) if token.expose_secret().is_blank() => {
                Err("credentials.access_token cannot be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            key_file: Some(default_key_file()),
            access_token: None,
            scope: default_scope(),
        }
    }
}

/// Reporting API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Data API (without the `/v1beta` path)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Maximum number of metrics per report request
    #[serde(default = "default_max_metrics_per_request")]
    pub max_metrics_per_request: usize,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        let url = url::Url::parse(&self.base_url)
            .map_err(|e| format!("api.base_url is not a valid URL: {e}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be greater than 0".to_string());
        }

        if self.max_metrics_per_request == 0 {
            return Err("api.max_metrics_per_request must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            max_metrics_per_request: default_max_metrics_per_request(),
        }
    }
}

/// Report definition shared by every property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Dimension names, in request order
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<String>,

    /// Index into `dimensions` of the join key
    #[serde(default)]
    pub join_key_index: usize,

    /// Metric batches, fetched in order
    #[serde(default = "default_metric_batches")]
    pub metric_batches: Vec<Vec<String>>,

    /// Report date range
    #[serde(default = "default_date_range")]
    pub date_range: DateRange,
}

impl ReportConfig {
    fn validate(&self, max_metrics: usize) -> Result<(), String> {
        let dimensions = self.dimension_set()?;
        if self.join_key_index >= dimensions.len() {
            return Err(format!(
                "report.join_key_index {} is out of range for {} dimension(s)",
                self.join_key_index,
                dimensions.len()
            ));
        }

        for (i, batch) in self.metric_batches()?.iter().enumerate() {
            if batch.len() > max_metrics {
                return Err(format!(
                    "report.metric_batches[{i}] has {} metrics, exceeding the limit of {max_metrics}",
                    batch.len()
                ));
            }
        }

        self.date_range.validate()
    }

    /// Parsed metric batches
    pub fn metric_batches(&self) -> Result<Vec<MetricBatch>, String> {
        if self.metric_batches.is_empty() {
            return Err("report.metric_batches cannot be empty".to_string());
        }
        self.metric_batches
            .iter()
            .enumerate()
            .map(|(i, names)| {
                MetricBatch::new(names.iter().cloned())
                    .map_err(|e| format!("report.metric_batches[{i}]: {e}"))
            })
            .collect()
    }

    /// Parsed dimension set
    pub fn dimension_set(&self) -> Result<DimensionSet, String> {
        DimensionSet::new(self.dimensions.iter().cloned())
            .map_err(|e| format!("report.dimensions: {e}"))
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            join_key_index: 0,
            metric_batches: default_metric_batches(),
            date_range: default_date_range(),
        }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the files are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,

    /// Formats to write for every property
    #[serde(default = "default_output_formats")]
    pub formats: BTreeSet<OutputFormat>,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.directory.trim().is_empty() {
            return Err("output.directory cannot be empty".to_string());
        }
        if self.formats.is_empty() {
            return Err("output.formats cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            formats: default_output_formats(),
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        Ok(())
    }

    /// `host:port` bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_key_file() -> String {
    "key.json".to_string()
}

fn default_scope() -> String {
    "https://www.googleapis.com/auth/analytics.readonly".to_string()
}

fn default_base_url() -> String {
    "https://analyticsdata.googleapis.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_metrics_per_request() -> usize {
    10
}

fn default_dimensions() -> Vec<String> {
    vec!["date".to_string()]
}

pub(crate) fn default_metric_batches() -> Vec<Vec<String>> {
    let first = [
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
    ];
    let second = [
        "averageRevenuePerUser",
        "crashAffectedUsers",
        "dauPerWau",
        "grossPurchaseRevenue",
        "screenPageViewsPerUser",
        "purchaseRevenue",
        "userEngagementDuration",
        "screenPageViews",
    ];
    vec![
        first.iter().map(|s| s.to_string()).collect(),
        second.iter().map(|s| s.to_string()).collect(),
    ]
}

fn default_date_range() -> DateRange {
    // 2024-01-01..2024-01-30 always exists
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    let end = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap_or_default();
    DateRange::new(ReportDate::Absolute(start), ReportDate::Absolute(end))
}

fn default_output_directory() -> String {
    ".".to_string()
}

fn default_output_formats() -> BTreeSet<OutputFormat> {
    [OutputFormat::Xlsx, OutputFormat::Csv].into_iter().collect()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
