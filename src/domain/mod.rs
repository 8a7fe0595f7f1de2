//! Domain models and types for ga4-export.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`PropertyId`], [`OutputName`])
//! - **Report models** ([`MetricBatch`], [`DimensionSet`], [`DateRange`],
//!   [`ReportRequest`], [`ReportResponse`])
//! - **The merged wide table** ([`MergedTable`]) and its [`OutputFormat`]s
//! - **Error types** ([`Ga4Error`], [`PipelineStep`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use ga4_export::domain::ReportResponse;
//!
//! let response = ReportResponse::new(["date"], ["activeUsers"])
//!     .with_row(["20240101"], ["42"]);
//! assert_eq!(response.row_count(), 1);
//! ```

pub mod errors;
pub mod format;
pub mod ids;
pub mod report;
pub mod result;
pub mod table;

pub use errors::{Ga4Error, PipelineStep};
pub use format::OutputFormat;
pub use ids::{OutputName, PropertyId};
pub use report::{
    DateRange, DimensionSet, MetricBatch, ReportDate, ReportRequest, ReportResponse, ReportRow,
};
pub use result::Result;
pub use table::{MergedRow, MergedTable, Record};
