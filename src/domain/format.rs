//! Output file formats

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format of an exported table
///
/// Ordering follows declaration order, so a `BTreeSet<OutputFormat>` always
/// writes the spreadsheet first, then CSV, then JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Excel workbook, one sheet, header row, no index column
    Xlsx,
    /// Comma-separated values with a header row, no index column
    Csv,
    /// Newline-delimited JSON, one object per row
    Json,
}

impl OutputFormat {
    /// Conventional file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xlsx" | "excel" | "spreadsheet" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" | "jsonl" | "ndjson" => Ok(OutputFormat::Json),
            other => Err(format!(
                "Unknown output format '{other}'. Must be one of: xlsx, csv, json"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("XLSX".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert_eq!("spreadsheet".parse::<OutputFormat>().unwrap(), OutputFormat::Xlsx);
        assert_eq!("ndjson".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("parquet".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_set_order() {
        let set: BTreeSet<_> = [OutputFormat::Json, OutputFormat::Csv, OutputFormat::Xlsx]
            .into_iter()
            .collect();
        let order: Vec<_> = set.into_iter().map(|f| f.extension()).collect();
        assert_eq!(order, vec!["xlsx", "csv", "json"]);
    }
}
