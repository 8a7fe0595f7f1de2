//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::Ga4Config;
use crate::domain::errors::Ga4Error;
use crate::domain::result::Result;
use crate::domain::{OutputFormat, ReportDate};
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`Ga4Config`]
/// 4. Applies environment variable overrides (`GA4_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`Ga4Error::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, the TOML is malformed, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use ga4_export::config::loader::load_config;
///
/// let config = load_config("ga4.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<Ga4Config> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Ga4Error::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        Ga4Error::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let mut config = parse_config(&contents)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        Ga4Error::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Parses TOML text after `${VAR}` substitution, without overrides or validation
pub fn parse_config(contents: &str) -> Result<Ga4Config> {
    let contents = substitute_env_vars(contents)?;
    toml::from_str(&contents)
        .map_err(|e| Ga4Error::Configuration(format!("Failed to parse TOML: {e}")))
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(Ga4Error::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `GA4_*` prefix
///
/// Variables follow the pattern `GA4_<SECTION>_<KEY>`, for example
/// `GA4_API_BASE_URL` or `GA4_REPORT_START_DATE`.
fn apply_env_overrides(config: &mut Ga4Config) -> Result<()> {
    // Application
    if let Ok(val) = std::env::var("GA4_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Credentials: each source replaces the other
    if let Ok(val) = std::env::var("GA4_CREDENTIALS_KEY_FILE") {
        config.credentials.key_file = Some(val);
        config.credentials.access_token = None;
    }
    if let Ok(val) = std::env::var("GA4_CREDENTIALS_ACCESS_TOKEN") {
        config.credentials.access_token = Some(super::secret_string(val));
        config.credentials.key_file = None;
    }

    // API
    if let Ok(val) = std::env::var("GA4_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Ok(val) = std::env::var("GA4_API_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.api.timeout_seconds = timeout;
        }
    }

    // Report
    if let Ok(val) = std::env::var("GA4_REPORT_START_DATE") {
        config.report.date_range.start = parse_date_override("GA4_REPORT_START_DATE", &val)?;
    }
    if let Ok(val) = std::env::var("GA4_REPORT_END_DATE") {
        config.report.date_range.end = parse_date_override("GA4_REPORT_END_DATE", &val)?;
    }

    // Output
    if let Ok(val) = std::env::var("GA4_OUTPUT_DIRECTORY") {
        config.output.directory = val;
    }
    if let Ok(val) = std::env::var("GA4_OUTPUT_FORMATS") {
        config.output.formats = parse_formats(&val).map_err(|e| {
            Ga4Error::Configuration(format!("Invalid GA4_OUTPUT_FORMATS: {e}"))
        })?;
    }

    // Server
    if let Ok(val) = std::env::var("GA4_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("GA4_SERVER_PORT") {
        if let Ok(port) = val.parse() {
            config.server.port = port;
        }
    }

    // Logging
    if let Ok(val) = std::env::var("GA4_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("GA4_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

fn parse_date_override(name: &str, value: &str) -> Result<ReportDate> {
    value
        .parse()
        .map_err(|e| Ga4Error::Configuration(format!("Invalid {name}: {e}")))
}

/// Parses a comma-separated format list (`"xlsx,csv,json"`)
pub fn parse_formats(value: &str) -> std::result::Result<BTreeSet<OutputFormat>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<OutputFormat>())
        .collect()
}
