//! External system integrations.
//!
//! - [`ga4`] - Google Analytics Data API (report requests and credentials)
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits so the pipeline can
//! be tested with in-memory implementations.
//!
//! ```rust,no_run
//! use ga4_export::adapters::ga4::{Ga4Client, ReportSource};
//! use ga4_export::config::load_config;
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ga4.toml")?;
//! let source: Arc<dyn ReportSource> = Arc::new(Ga4Client::from_config(&config)?);
//! # Ok(())
//! # }
//! ```

pub mod ga4;
