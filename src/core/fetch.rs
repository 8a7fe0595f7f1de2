//! Report fetching
//!
//! One request per (property, metric batch). Requests are checked locally
//! before anything goes over the wire.

use crate::adapters::ga4::ReportSource;
use crate::domain::{
    DateRange, DimensionSet, Ga4Error, MetricBatch, PropertyId, ReportRequest, ReportResponse,
    Result,
};
use std::sync::Arc;

/// Issues report requests against a [`ReportSource`]
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn ReportSource>,
    max_metrics: usize,
}

impl Fetcher {
    pub fn new(source: Arc<dyn ReportSource>, max_metrics: usize) -> Self {
        Self {
            source,
            max_metrics,
        }
    }

    /// Base URL of the underlying source, for logging
    pub fn source_url(&self) -> &str {
        self.source.base_url()
    }

    /// Fetches one metric batch for one property
    ///
    /// # Errors
    ///
    /// Returns [`Ga4Error::InvalidRequest`] without contacting the source when
    /// the batch is empty or larger than the per-request limit, or when no
    /// dimensions are given. Source errors are passed through unchanged.
    pub async fn fetch(
        &self,
        property_id: &PropertyId,
        metrics: &MetricBatch,
        dimensions: &DimensionSet,
        date_range: &DateRange,
    ) -> Result<ReportResponse> {
        self.check(metrics, dimensions)?;

        let request = ReportRequest {
            property_id: property_id.clone(),
            metrics: metrics.clone(),
            dimensions: dimensions.clone(),
            date_range: *date_range,
        };

        self.source.run_report(&request).await
    }

    fn check(&self, metrics: &MetricBatch, dimensions: &DimensionSet) -> Result<()> {
        if metrics.is_empty() {
            return Err(Ga4Error::InvalidRequest(
                "metric batch cannot be empty".to_string(),
            ));
        }
        if dimensions.is_empty() {
            return Err(Ga4Error::InvalidRequest(
                "dimension set cannot be empty".to_string(),
            ));
        }
        if metrics.len() > self.max_metrics {
            return Err(Ga4Error::InvalidRequest(format!(
                "metric batch has {} metrics, the limit is {}",
                metrics.len(),
                self.max_metrics
            )));
        }
        Ok(())
    }
}
