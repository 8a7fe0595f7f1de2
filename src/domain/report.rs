//! Report request and response models
//!
//! These are the transient, per-run entities exchanged between the fetcher and
//! the merger. They are independent of the wire format used by the reporting
//! API (see `adapters::ga4::models` for that).

use super::ids::PropertyId;
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered list of metric names requested together
///
/// Batches exist because the reporting API caps the number of metrics per
/// request; the cap itself is enforced by the fetcher since it is configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricBatch(Vec<String>);

impl MetricBatch {
    /// Creates a batch from metric names
    ///
    /// Fails if the list is empty or any name is blank.
    pub fn new<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err("Metric batch cannot be empty".to_string());
        }
        if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(format!("Metric name at position {pos} is empty"));
        }
        Ok(Self(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered list of dimension names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionSet(Vec<String>);

impl DimensionSet {
    /// Creates a dimension set; fails if empty or any name is blank
    pub fn new<I, S>(names: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err("Dimension set cannot be empty".to_string());
        }
        if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
            return Err(format!("Dimension name at position {pos} is empty"));
        }
        Ok(Self(names))
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One end of a report date range
///
/// Mirrors the date forms the reporting API accepts: an absolute
/// `YYYY-MM-DD` date, `today`, `yesterday`, or `NdaysAgo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportDate {
    Absolute(NaiveDate),
    Today,
    Yesterday,
    DaysAgo(u32),
}

impl ReportDate {
    /// Resolves to a calendar date relative to `today`
    ///
    /// Returns `None` when `NdaysAgo` reaches past the earliest representable date.
    pub fn resolve(&self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            ReportDate::Absolute(date) => Some(*date),
            ReportDate::Today => Some(today),
            ReportDate::Yesterday => today.checked_sub_signed(Duration::days(1)),
            ReportDate::DaysAgo(n) => today.checked_sub_signed(Duration::days(i64::from(*n))),
        }
    }
}

impl fmt::Display for ReportDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportDate::Absolute(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ReportDate::Today => write!(f, "today"),
            ReportDate::Yesterday => write!(f, "yesterday"),
            ReportDate::DaysAgo(n) => write!(f, "{n}daysAgo"),
        }
    }
}

impl FromStr for ReportDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "today" => return Ok(ReportDate::Today),
            "yesterday" => return Ok(ReportDate::Yesterday),
            _ => {}
        }

        if let Some(n) = s.strip_suffix("daysAgo") {
            return n
                .parse::<u32>()
                .map(ReportDate::DaysAgo)
                .map_err(|_| format!("Invalid relative date '{s}'"));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(ReportDate::Absolute)
            .map_err(|e| {
                format!("Invalid date '{s}': expected YYYY-MM-DD, today, yesterday or NdaysAgo ({e})")
            })
    }
}

impl TryFrom<String> for ReportDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportDate> for String {
    fn from(value: ReportDate) -> Self {
        value.to_string()
    }
}

/// Inclusive date range of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: ReportDate,
    pub end: ReportDate,
}

impl DateRange {
    pub fn new(start: ReportDate, end: ReportDate) -> Self {
        Self { start, end }
    }

    /// Checks that the range is not inverted, resolving relative dates
    /// against the current UTC date
    pub fn validate(&self) -> Result<(), String> {
        self.validate_at(Utc::now().date_naive())
    }

    pub(crate) fn validate_at(&self, today: NaiveDate) -> Result<(), String> {
        let resolve = |date: ReportDate| {
            date.resolve(today)
                .ok_or_else(|| format!("Date {date} is out of range"))
        };
        let start = resolve(self.start)?;
        let end = resolve(self.end)?;
        if start > end {
            return Err(format!(
                "Date range start ({}) is after end ({})",
                self.start, self.end
            ));
        }
        Ok(())
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A single report request: one property, one metric batch
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub property_id: PropertyId,
    pub metrics: MetricBatch,
    pub dimensions: DimensionSet,
    pub date_range: DateRange,
}

/// One row of a report response
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportRow {
    /// Values in dimension request order
    pub dimension_values: Vec<String>,
    /// Values in metric header order
    pub metric_values: Vec<String>,
}

/// Tabular result of one report request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportResponse {
    pub dimension_headers: Vec<String>,
    pub metric_headers: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl ReportResponse {
    /// Creates an empty response with the given headers
    pub fn new<D, M>(dimension_headers: D, metric_headers: M) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            dimension_headers: dimension_headers.into_iter().map(Into::into).collect(),
            metric_headers: metric_headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row
    pub fn with_row<D, M>(mut self, dimension_values: D, metric_values: M) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        self.rows.push(ReportRow {
            dimension_values: dimension_values.into_iter().map(Into::into).collect(),
            metric_values: metric_values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
