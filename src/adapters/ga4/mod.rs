//! Google Analytics Data API adapter
//!
//! [`Ga4Client`] implements [`ReportSource`] over HTTP. Credentials come from
//! [`TokenSource`]: either a pre-issued token or a service-account key file.

pub mod auth;
pub mod client;
pub mod models;
mod source;

pub use auth::{ServiceAccountKey, TokenSource};
pub use client::Ga4Client;
pub use source::ReportSource;
