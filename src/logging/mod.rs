//! Logging and observability
//!
//! Structured logging with:
//! - Human-readable console output
//! - Configurable log levels (`RUST_LOG` wins when set)
//! - Optional JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ga4_export::logging::init_logging;
//! use ga4_export::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a property fetch
///
/// # Example
///
/// ```no_run
/// use ga4_export::log_fetch_start;
/// use ga4_export::domain::{OutputName, PropertyId};
///
/// let property = PropertyId::new("123456").unwrap();
/// let output = OutputName::new("Smarty-Jacket").unwrap();
/// log_fetch_start!(&property, &output, 2);
/// ```
#[macro_export]
macro_rules! log_fetch_start {
    ($property_id:expr, $output_name:expr, $batches:expr) => {
        tracing::info!(
            property_id = %$property_id,
            output_name = %$output_name,
            batches = $batches,
            "Fetching property report"
        );
    };
}

/// Log the completion of a property
///
/// # Example
///
/// ```no_run
/// use ga4_export::log_property_complete;
/// use std::time::Duration;
///
/// log_property_complete!("123456", 30, 3, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_property_complete {
    ($property_id:expr, $rows:expr, $files:expr, $duration:expr) => {
        tracing::info!(
            property_id = %$property_id,
            rows = $rows,
            files = $files,
            duration_ms = $duration.as_millis(),
            "Property exported"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use ga4_export::log_error_with_context;
/// use ga4_export::domain::Ga4Error;
///
/// let error = Ga4Error::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
