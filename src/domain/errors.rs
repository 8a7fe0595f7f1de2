//! Domain error types
//!
//! This module defines the error hierarchy for ga4-export. Errors never expose
//! third-party client types; HTTP and encoder failures are mapped to one of the
//! variants below together with a human-readable message.

use std::fmt;
use thiserror::Error;

/// Main error type
///
/// Every fallible operation in the crate returns this type. Pipeline failures
/// are wrapped in [`Ga4Error::Property`] so the caller can see which property
/// and which step failed.
#[derive(Debug, Error)]
pub enum Ga4Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credentials are missing, malformed, rejected, or expired
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The request was rejected as invalid (oversized batch, unknown metric or
    /// dimension name, unknown property)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Transient upstream failure (5xx, quota exhaustion, connection failure)
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The upstream answered with something that cannot be interpreted
    #[error("Invalid response from reporting API: {0}")]
    InvalidResponse(String),

    /// Merge was called without any responses
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Output file could not be written
    #[error("Failed to write {path}: {message}")]
    Write { path: String, message: String },

    /// I/O errors outside of export writing
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A pipeline step failed for a specific property
    #[error("Property {property_id} failed during {step}: {source}")]
    Property {
        property_id: String,
        step: PipelineStep,
        #[source]
        source: Box<Ga4Error>,
    },
}

/// Step of the per-property pipeline, used as error context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    /// Fetching the metric batch at the given 1-based position
    Fetch { batch: usize },
    /// Merging the fetched batches
    Merge,
    /// Writing the merged table
    Export,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStep::Fetch { batch } => write!(f, "fetch batch {batch}"),
            PipelineStep::Merge => write!(f, "merge"),
            PipelineStep::Export => write!(f, "export"),
        }
    }
}

impl Ga4Error {
    /// Wraps this error with property and step context
    pub fn in_property(self, property_id: impl Into<String>, step: PipelineStep) -> Self {
        Ga4Error::Property {
            property_id: property_id.into(),
            step,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping context wrappers
    pub fn root(&self) -> &Ga4Error {
        match self {
            Ga4Error::Property { source, .. } => source.root(),
            other => other,
        }
    }

    /// Process exit code for this error
    ///
    /// 2 = configuration, 3 = authentication, 4 = upstream/request, 5 = other.
    pub fn exit_code(&self) -> i32 {
        match self.root() {
            Ga4Error::Configuration(_) => 2,
            Ga4Error::Authentication(_) => 3,
            Ga4Error::InvalidRequest(_)
            | Ga4Error::UpstreamUnavailable(_)
            | Ga4Error::InvalidResponse(_) => 4,
            _ => 5,
        }
    }

    pub(crate) fn write(path: impl fmt::Display, message: impl fmt::Display) -> Self {
        Ga4Error::Write {
            path: path.to_string(),
            message: message.to_string(),
        }
    }
}

impl From<std::io::Error> for Ga4Error {
    fn from(err: std::io::Error) -> Self {
        Ga4Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Ga4Error {
    fn from(err: serde_json::Error) -> Self {
        Ga4Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Ga4Error {
    fn from(err: toml::de::Error) -> Self {
        Ga4Error::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Ga4Error::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_property_context_display() {
        let err = Ga4Error::UpstreamUnavailable("status 503".to_string())
            .in_property("123456", PipelineStep::Fetch { batch: 2 });

        assert_eq!(
            err.to_string(),
            "Property 123456 failed during fetch batch 2: Upstream unavailable: status 503"
        );
    }

    #[test]
    fn test_root_skips_context() {
        let err = Ga4Error::EmptyInput("no responses".to_string())
            .in_property("1", PipelineStep::Merge);

        assert!(matches!(err.root(), Ga4Error::EmptyInput(_)));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Ga4Error::Configuration(String::new()).exit_code(), 2);
        assert_eq!(
            Ga4Error::Authentication(String::new())
                .in_property("1", PipelineStep::Fetch { batch: 1 })
                .exit_code(),
            3
        );
        assert_eq!(Ga4Error::InvalidRequest(String::new()).exit_code(), 4);
        assert_eq!(Ga4Error::write("a.csv", "denied").exit_code(), 5);
    }

    #[test]
    fn test_write_error_display() {
        let err = Ga4Error::write("out/report.csv", "permission denied");
        assert_eq!(
            err.to_string(),
            "Failed to write out/report.csv: permission denied"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: Ga4Error = io_err.into();
        assert!(matches!(err, Ga4Error::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: Ga4Error = toml_err.into();
        assert!(matches!(err, Ga4Error::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }
}
