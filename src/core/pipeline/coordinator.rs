//! Report pipeline - orchestrates fetch, merge and export per property
//!
//! Properties are processed one after another. Within a property every
//! metric batch is fetched in order, then merged, then exported. The first
//! failure aborts the run and is returned wrapped with the property id and
//! the failing step.

use super::summary::{PropertySummary, RunSummary};
use crate::adapters::ga4::ReportSource;
use crate::config::Ga4Config;
use crate::core::export::export;
use crate::core::fetch::Fetcher;
use crate::core::merge::merge;
use crate::domain::{
    DateRange, DimensionSet, Ga4Error, MetricBatch, OutputFormat, OutputName, PipelineStep,
    PropertyId, Result,
};
use crate::{log_fetch_start, log_property_complete};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Report pipeline
pub struct ReportPipeline {
    targets: Vec<(PropertyId, OutputName)>,
    metric_batches: Vec<MetricBatch>,
    dimensions: DimensionSet,
    date_range: DateRange,
    join_key_index: usize,
    output_dir: PathBuf,
    formats: BTreeSet<OutputFormat>,
    fetcher: Fetcher,
}

impl ReportPipeline {
    /// Builds a pipeline from configuration and a report source
    ///
    /// # Errors
    ///
    /// Returns [`Ga4Error::Configuration`] if the report definition or the
    /// property list is invalid.
    pub fn new(config: &Ga4Config, source: Arc<dyn ReportSource>) -> Result<Self> {
        let targets = config.property_targets().map_err(Ga4Error::Configuration)?;
        let metric_batches = config
            .report
            .metric_batches()
            .map_err(Ga4Error::Configuration)?;
        let dimensions = config
            .report
            .dimension_set()
            .map_err(Ga4Error::Configuration)?;

        if config.report.join_key_index >= dimensions.len() {
            return Err(Ga4Error::Configuration(format!(
                "report.join_key_index {} is out of range for {} dimension(s)",
                config.report.join_key_index,
                dimensions.len()
            )));
        }

        Ok(Self {
            targets,
            metric_batches,
            dimensions,
            date_range: config.report.date_range,
            join_key_index: config.report.join_key_index,
            output_dir: PathBuf::from(&config.output.directory),
            formats: config.output.formats.clone(),
            fetcher: Fetcher::new(source, config.api.max_metrics_per_request),
        })
    }

    /// Runs every property in order
    ///
    /// # Errors
    ///
    /// Returns the first failure as [`Ga4Error::Property`]; later properties
    /// are not attempted.
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new();

        tracing::info!(
            api = %self.fetcher.source_url(),
            properties = self.targets.len(),
            batches = self.metric_batches.len(),
            date_range = %self.date_range,
            output_dir = %self.output_dir.display(),
            "Starting report run"
        );

        for (property_id, output_name) in &self.targets {
            let property = self.run_property(property_id, output_name).await.map_err(|e| {
                tracing::error!(error = %e, "Report run aborted");
                e
            })?;
            summary.add_property(property);
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn run_property(
        &self,
        property_id: &PropertyId,
        output_name: &OutputName,
    ) -> Result<PropertySummary> {
        let start_time = Instant::now();
        log_fetch_start!(property_id, output_name, self.metric_batches.len());

        let mut responses = Vec::with_capacity(self.metric_batches.len());
        for (index, batch) in self.metric_batches.iter().enumerate() {
            let response = self
                .fetcher
                .fetch(property_id, batch, &self.dimensions, &self.date_range)
                .await
                .map_err(|e| {
                    e.in_property(property_id.as_str(), PipelineStep::Fetch { batch: index + 1 })
                })?;

            tracing::debug!(
                property_id = %property_id,
                batch = index + 1,
                rows = response.row_count(),
                "Fetched metric batch"
            );
            responses.push(response);
        }

        let table = merge(&responses, self.join_key_index)
            .map_err(|e| e.in_property(property_id.as_str(), PipelineStep::Merge))?;

        let files = export(&table, &self.output_dir, output_name, &self.formats)
            .map_err(|e| e.in_property(property_id.as_str(), PipelineStep::Export))?;

        let duration = start_time.elapsed();
        log_property_complete!(property_id, table.row_count(), files.len(), duration);

        Ok(PropertySummary {
            property_id: property_id.clone(),
            output_name: output_name.clone(),
            batches: responses.len(),
            rows: table.row_count(),
            columns: table.column_count(),
            files,
            duration,
        })
    }
}
