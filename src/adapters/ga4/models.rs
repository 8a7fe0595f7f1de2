//! Reporting API wire models
//!
//! These mirror the JSON bodies of `properties/{id}:runReport` and are kept
//! separate from the domain types in [`crate::domain::report`].

use crate::domain::{Ga4Error, ReportRequest, ReportResponse, ReportRow, Result};
use serde::{Deserialize, Serialize};

/// `runReport` request body
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportBody {
    pub date_ranges: Vec<WireDateRange>,
    pub dimensions: Vec<NamedField>,
    pub metrics: Vec<NamedField>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDateRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedField {
    pub name: String,
}

impl From<&ReportRequest> for RunReportBody {
    fn from(request: &ReportRequest) -> Self {
        let named = |names: &[String]| {
            names
                .iter()
                .map(|name| NamedField { name: name.clone() })
                .collect()
        };

        Self {
            date_ranges: vec![WireDateRange {
                start_date: request.date_range.start.to_string(),
                end_date: request.date_range.end.to_string(),
            }],
            dimensions: named(request.dimensions.names()),
            metrics: named(request.metrics.names()),
        }
    }
}

/// `runReport` response body
///
/// `rows` is omitted by the API when the report is empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub dimension_headers: Vec<NamedField>,
    #[serde(default)]
    pub metric_headers: Vec<NamedField>,
    #[serde(default)]
    pub rows: Vec<WireRow>,
    /// Total matching rows upstream; can exceed `rows.len()`
    #[serde(default)]
    pub row_count: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRow {
    #[serde(default)]
    pub dimension_values: Vec<WireValue>,
    #[serde(default)]
    pub metric_values: Vec<WireValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireValue {
    #[serde(default)]
    pub value: Option<String>,
}

impl RunReportResponse {
    /// Converts to the domain response
    ///
    /// # Errors
    ///
    /// Returns [`Ga4Error::InvalidResponse`] when a row's value count does not
    /// match the headers.
    pub fn into_domain(self) -> Result<ReportResponse> {
        let dimension_count = self.dimension_headers.len();
        let metric_count = self.metric_headers.len();

        let mut response = ReportResponse::new(
            self.dimension_headers.into_iter().map(|h| h.name),
            self.metric_headers.into_iter().map(|h| h.name),
        );

        for (index, row) in self.rows.into_iter().enumerate() {
            if row.dimension_values.len() != dimension_count
                || row.metric_values.len() != metric_count
            {
                return Err(Ga4Error::InvalidResponse(format!(
                    "row {index} has {} dimension and {} metric values, expected {dimension_count} and {metric_count}",
                    row.dimension_values.len(),
                    row.metric_values.len()
                )));
            }

            response.rows.push(ReportRow {
                dimension_values: row.dimension_values.into_iter().map(WireValue::text).collect(),
                metric_values: row.metric_values.into_iter().map(WireValue::text).collect(),
            });
        }

        Ok(response)
    }
}

impl WireValue {
    fn text(self) -> String {
        self.value.unwrap_or_default()
    }
}

/// Error envelope returned by Google APIs
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiErrorBody {
    /// Best-effort human message from an error body
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => match parsed.error.status {
                Some(status) => format!("{status}: {}", parsed.error.message),
                None => parsed.error.message,
            },
            Err(_) => body.trim().chars().take(500).collect(),
        }
    }
}
