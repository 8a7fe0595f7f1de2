//! Core business logic.
//!
//! # Modules
//!
//! - [`fetch`] - One report request per property and metric batch
//! - [`merge`] - Wide outer join of batches on the join dimension
//! - [`export`] - Spreadsheet, CSV and JSON writers
//! - [`pipeline`] - Orchestration and run summaries
//!
//! # Workflow
//!
//! For each configured property, in order:
//!
//! 1. **Fetch**: request every metric batch for the configured date range
//! 2. **Merge**: outer-join the batches on the join key
//! 3. **Export**: write `<basename>.<ext>` for every configured format
//!
//! # Example
//!
//! ```rust,no_run
//! use ga4_export::adapters::ga4::Ga4Client;
//! use ga4_export::config::load_config;
//! use ga4_export::core::pipeline::ReportPipeline;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ga4.toml")?;
//! let client = Arc::new(Ga4Client::from_config(&config)?);
//!
//! let summary = ReportPipeline::new(&config, client)?.run().await?;
//! println!("Rows written: {}", summary.total_rows());
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod fetch;
pub mod merge;
pub mod pipeline;
