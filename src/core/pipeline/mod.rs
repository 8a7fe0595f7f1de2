//! Per-property orchestration: fetch every batch, merge, export

pub mod coordinator;
pub mod summary;

pub use coordinator::ReportPipeline;
pub use summary::{PropertySummary, RunSummary};
