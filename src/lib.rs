// ga4-export - GA4 report batch fetch, merge and export
// Copyright (c) 2025 ga4-export Contributors
// Licensed under the MIT License

//! # ga4-export
//!
//! Pulls analytics metrics for a set of Google Analytics 4 properties across
//! several metric batches, merges the batches per date into one wide table,
//! and writes it as a spreadsheet, CSV or newline-delimited JSON.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface (`run`, `serve`, `validate-config`, `init`)
//! - [`server`] - HTTP trigger (`GET /fetch-ga4-data/`)
//! - [`core`] - Fetch, merge, export and the per-property pipeline
//! - [`adapters`] - Reporting API client and credentials
//! - [`domain`] - Domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ga4_export::adapters::ga4::Ga4Client;
//! use ga4_export::config::load_config;
//! use ga4_export::core::pipeline::ReportPipeline;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ga4.toml")?;
//!     let client = Arc::new(Ga4Client::from_config(&config)?);
//!
//!     let summary = ReportPipeline::new(&config, client)?.run().await?;
//!     println!("Wrote {} files", summary.total_files());
//!     Ok(())
//! }
//! ```
//!
//! ## Merging
//!
//! Batches are outer-joined on the join dimension (`date` by default):
//!
//! ```rust
//! use ga4_export::core::merge::merge;
//! use ga4_export::domain::ReportResponse;
//!
//! let first = ReportResponse::new(["date"], ["activeUsers"]).with_row(["20240101"], ["12"]);
//! let second = ReportResponse::new(["date"], ["newUsers"]).with_row(["20240102"], ["3"]);
//!
//! let table = merge(&[first, second], 0).unwrap();
//! assert_eq!(table.header(), vec!["date", "activeUsers", "newUsers"]);
//! assert_eq!(table.row_count(), 2);
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::Ga4Error`]. Pipeline failures are
//! wrapped with the property id and the failing step:
//!
//! ```rust
//! use ga4_export::domain::{Ga4Error, PipelineStep};
//!
//! let err = Ga4Error::UpstreamUnavailable("503".into())
//!     .in_property("123", PipelineStep::Fetch { batch: 2 });
//! assert_eq!(err.exit_code(), 4);
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod server;
