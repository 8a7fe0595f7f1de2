//! Reporting API client
//!
//! Issues `POST {base}/v1beta/properties/{id}:runReport` with a bearer token
//! from [`TokenSource`] and maps HTTP failures onto [`Ga4Error`] variants.

use super::auth::TokenSource;
use super::models::{ApiErrorBody, RunReportBody, RunReportResponse};
use super::source::ReportSource;
use crate::config::Ga4Config;
use crate::domain::{Ga4Error, ReportRequest, ReportResponse, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;

const API_VERSION: &str = "v1beta";

/// HTTP client for the reporting API
pub struct Ga4Client {
    base_url: String,
    client: Client,
    tokens: TokenSource,
}

impl Ga4Client {
    /// Builds a client from configuration
    ///
    /// Credentials are loaded eagerly.
    ///
    /// # Errors
    ///
    /// - [`Ga4Error::Authentication`] when the key file is missing or malformed
    /// - [`Ga4Error::Configuration`] when the HTTP client cannot be built
    pub fn from_config(config: &Ga4Config) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Ga4Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let tokens = TokenSource::from_config(&config.credentials, client.clone())?;

        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            client,
            tokens,
        })
    }

    fn report_url(&self, request: &ReportRequest) -> String {
        format!(
            "{}/{API_VERSION}/{}:runReport",
            self.base_url,
            request.property_id.resource_name()
        )
    }
}

/// Maps a non-success status to an error variant
fn status_error(status: StatusCode, body: &str) -> Ga4Error {
    let message = format!(
        "reporting API returned {status}: {}",
        ApiErrorBody::message_from(body)
    );

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ga4Error::Authentication(message),
        StatusCode::TOO_MANY_REQUESTS => Ga4Error::UpstreamUnavailable(message),
        s if s.is_server_error() => Ga4Error::UpstreamUnavailable(message),
        s if s.is_client_error() => Ga4Error::InvalidRequest(message),
        _ => Ga4Error::InvalidResponse(message),
    }
}

#[async_trait]
impl ReportSource for Ga4Client {
    async fn run_report(&self, request: &ReportRequest) -> Result<ReportResponse> {
        let url = self.report_url(request);
        let token = self.tokens.bearer().await?;

        tracing::debug!(
            url = %url,
            property_id = %request.property_id,
            metrics = request.metrics.len(),
            date_range = %request.date_range,
            "Running report"
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&RunReportBody::from(request))
            .send()
            .await
            .map_err(|e| Ga4Error::UpstreamUnavailable(format!("Request to {url} failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        let body: RunReportResponse = resp.json().await.map_err(|e| {
            Ga4Error::InvalidResponse(format!("Failed to decode report body: {e}"))
        })?;

        let total_rows = body.row_count;
        let response = body.into_domain()?;
        tracing::debug!(
            property_id = %request.property_id,
            rows = response.row_count(),
            total_rows = ?total_rows,
            "Report received"
        );
        Ok(response)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
