//! Report source trait
//!
//! The pipeline only talks to the reporting API through [`ReportSource`], so
//! tests can substitute an in-memory source.

use crate::domain::{ReportRequest, ReportResponse, Result};
use async_trait::async_trait;

/// Anything that can answer a single report request
///
/// # Example
///
/// ```no_run
/// use ga4_export::adapters::ga4::{Ga4Client, ReportSource};
/// use ga4_export::config::load_config;
///
/// # async fn example() -> ga4_export::domain::Result<()> {
/// let config = load_config("ga4.toml")?;
/// let client = Ga4Client::from_config(&config)?;
/// println!("Reporting API at {}", client.base_url());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Runs one report request
    ///
    /// # Errors
    ///
    /// - [`Authentication`](crate::domain::Ga4Error::Authentication) when credentials are rejected
    /// - [`InvalidRequest`](crate::domain::Ga4Error::InvalidRequest) for unknown names or properties
    /// - [`UpstreamUnavailable`](crate::domain::Ga4Error::UpstreamUnavailable) for transient failures
    /// - [`InvalidResponse`](crate::domain::Ga4Error::InvalidResponse) when the body cannot be decoded
    async fn run_report(&self, request: &ReportRequest) -> Result<ReportResponse>;

    /// Base URL of the API this source talks to
    fn base_url(&self) -> &str;
}
