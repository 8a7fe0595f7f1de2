//! Result type alias for ga4-export

use super::errors::Ga4Error;

/// Result type alias using [`Ga4Error`] as the error type
///
/// # Examples
///
/// ```
/// use ga4_export::domain::result::Result;
/// use ga4_export::domain::errors::Ga4Error;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(Ga4Error::EmptyInput("nothing to merge".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, Ga4Error>;
