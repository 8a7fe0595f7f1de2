//! Identifier newtypes
//!
//! Property identifiers and output basenames are plain strings on the wire and
//! in configuration; wrapping them keeps the two from being swapped.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GA4 property identifier
///
/// Accepts either the bare id (`"123456789"`) or the resource name form
/// (`"properties/123456789"`); the prefix is stripped.
///
/// # Examples
///
/// ```
/// use ga4_export::domain::ids::PropertyId;
/// use std::str::FromStr;
///
/// let id = PropertyId::from_str("properties/123456789").unwrap();
/// assert_eq!(id.as_str(), "123456789");
/// assert_eq!(id.resource_name(), "properties/123456789");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(String);

impl PropertyId {
    /// Creates a new PropertyId
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let id = id.trim();
        let id = id.strip_prefix("properties/").unwrap_or(id);

        if id.is_empty() {
            return Err("Property ID cannot be empty".to_string());
        }
        if id.contains('/') || id.chars().any(char::is_whitespace) {
            return Err(format!(
                "Invalid property ID '{id}': must not contain '/' or whitespace"
            ));
        }

        Ok(Self(id.to_string()))
    }

    /// Returns the bare property id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `properties/{id}` resource name used in API paths
    pub fn resource_name(&self) -> String {
        format!("properties/{}", self.0)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PropertyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PropertyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Basename for a property's output files (`<name>.xlsx`, `<name>.csv`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputName(String);

impl OutputName {
    /// Creates a new OutputName
    ///
    /// The name must be a single path component: no separators, not `.` or `..`.
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Output name cannot be empty".to_string());
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(format!(
                "Invalid output name '{name}': must be a plain file name"
            ));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OutputName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_id_valid() {
        let id = PropertyId::new("123456789").unwrap();
        assert_eq!(id.as_str(), "123456789");
        assert_eq!(id.to_string(), "123456789");
    }

    #[test]
    fn test_property_id_strips_resource_prefix() {
        let id = PropertyId::new("properties/42").unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.resource_name(), "properties/42");
    }

    #[test]
    fn test_property_id_rejects_empty() {
        assert!(PropertyId::new("").is_err());
        assert!(PropertyId::new("   ").is_err());
        assert!(PropertyId::new("properties/").is_err());
    }

    #[test]
    fn test_property_id_rejects_path() {
        assert!(PropertyId::new("12/34").is_err());
        assert!(PropertyId::new("12 34").is_err());
    }

    #[test]
    fn test_output_name_valid() {
        let name = OutputName::new("Smarty-Jacket").unwrap();
        assert_eq!(name.as_str(), "Smarty-Jacket");
    }

    #[test]
    fn test_output_name_rejects_paths() {
        assert!(OutputName::new("").is_err());
        assert!(OutputName::new("../escape").is_err());
        assert!(OutputName::new("a\\b").is_err());
        assert!(OutputName::new("..").is_err());
    }
}
