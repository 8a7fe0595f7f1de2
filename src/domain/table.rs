//! Wide merged table
//!
//! One row per join-key occurrence, one column per metric. Cells are
//! `Option<String>`: `None` means the batch that owns the column had no row
//! for that key.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single row of a [`MergedTable`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    /// Join-key value (e.g. the `date` dimension)
    pub key: String,
    /// One cell per metric column, in column order
    pub values: Vec<Option<String>>,
}

/// Result of merging all batches of one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedTable {
    key_column: String,
    columns: Vec<String>,
    rows: Vec<MergedRow>,
}

impl MergedTable {
    /// Builds a table; every row is padded or truncated to the column count
    pub fn new(key_column: impl Into<String>, columns: Vec<String>, rows: Vec<MergedRow>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.values.resize(width, None);
                row
            })
            .collect();

        Self {
            key_column: key_column.into(),
            columns,
            rows,
        }
    }

    /// Name of the join-key column
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Metric column names, without the key column
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    /// Full header: key column followed by metric columns
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.key_column.as_str())
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    /// Number of columns including the key column
    pub fn column_count(&self) -> usize {
        self.columns.len() + 1
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a cell by row index and metric column name
    ///
    /// Returns `None` for unknown columns, out-of-range rows and null cells.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row)?.values.get(col)?.as_deref()
    }

    /// Iterates rows as serializable records (`{key_column: key, metric: value, ...}`)
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(move |row| Record { table: self, row })
    }
}

/// Borrowed view of one row that serializes as an ordered JSON object
pub struct Record<'a> {
    table: &'a MergedTable,
    row: &'a MergedRow,
}

impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.table.column_count()))?;
        map.serialize_entry(&self.table.key_column, &self.row.key)?;
        for (name, value) in self.table.columns.iter().zip(&self.row.values) {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MergedTable {
        MergedTable::new(
            "date",
            vec!["engagementRate".to_string(), "newUsers".to_string()],
            vec![
                MergedRow {
                    key: "20240101".to_string(),
                    values: vec![Some("0.5".to_string()), Some("10".to_string())],
                },
                MergedRow {
                    key: "20240102".to_string(),
                    values: vec![None, Some("5".to_string())],
                },
            ],
        )
    }

    #[test]
    fn test_header_and_counts() {
        let table = sample();
        assert_eq!(table.header(), vec!["date", "engagementRate", "newUsers"]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_value_lookup() {
        let table = sample();
        assert_eq!(table.value(0, "newUsers"), Some("10"));
        assert_eq!(table.value(1, "engagementRate"), None);
        assert_eq!(table.value(5, "newUsers"), None);
        assert_eq!(table.value(0, "unknown"), None);
    }

    #[test]
    fn test_rows_are_padded_to_width() {
        let table = MergedTable::new(
            "date",
            vec!["a".to_string(), "b".to_string()],
            vec![MergedRow {
                key: "20240101".to_string(),
                values: vec![Some("1".to_string())],
            }],
        );
        assert_eq!(table.rows()[0].values.len(), 2);
        assert_eq!(table.value(0, "b"), None);
    }

    #[test]
    fn test_record_serializes_in_column_order() {
        let table = sample();
        let lines: Vec<String> = table
            .records()
            .map(|r| serde_json::to_string(&r).unwrap())
            .collect();

        assert_eq!(
            lines[0],
            r#"{"date":"20240101","engagementRate":"0.5","newUsers":"10"}"#
        );
        assert_eq!(
            lines[1],
            r#"{"date":"20240102","engagementRate":null,"newUsers":"5"}"#
        );
    }
}
