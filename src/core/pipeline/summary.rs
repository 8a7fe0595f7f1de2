//! Run summary and reporting

use crate::domain::{OutputName, PropertyId};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one property
#[derive(Debug, Clone)]
pub struct PropertySummary {
    pub property_id: PropertyId,
    pub output_name: OutputName,

    /// Number of metric batches fetched
    pub batches: usize,

    /// Rows in the merged table
    pub rows: usize,

    /// Columns in the merged table, including the key column
    pub columns: usize,

    /// Files written, in format order
    pub files: Vec<PathBuf>,

    pub duration: Duration,
}

/// Summary of a pipeline run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Per-property results, in processing order
    pub properties: Vec<PropertySummary>,

    /// Wall-clock duration of the whole run
    pub duration: Duration,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn add_property(&mut self, property: PropertySummary) {
        self.properties.push(property);
    }

    pub fn total_rows(&self) -> usize {
        self.properties.iter().map(|p| p.rows).sum()
    }

    pub fn total_files(&self) -> usize {
        self.properties.iter().map(|p| p.files.len()).sum()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            properties = self.properties.len(),
            total_rows = self.total_rows(),
            total_files = self.total_files(),
            duration_ms = self.duration.as_millis(),
            "Run completed"
        );
    }
}
