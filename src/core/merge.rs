//! Wide outer join of report batches
//!
//! Every batch is keyed by the join dimension and all batches are combined
//! with a full outer join. Duplicate keys within a batch are matched by
//! occurrence: the n-th row with a key joins the n-th row with the same key in
//! every other batch.

use crate::domain::{Ga4Error, MergedRow, MergedTable, ReportResponse, Result};
use std::collections::{BTreeMap, HashMap};

const FALLBACK_KEY_COLUMN: &str = "date";

/// Merges report responses into one table keyed by the join dimension
///
/// Columns appear in first-seen order. When two batches share a metric name
/// the column keeps its first position but holds the later batch's values,
/// null where the later batch has no row for a key. Rows are ordered by key,
/// then by occurrence.
///
/// # Errors
///
/// - [`Ga4Error::EmptyInput`] when `responses` is empty
/// - [`Ga4Error::InvalidResponse`] when a row has no value at `join_key_index`,
///   or a metric header repeats the join-key column name
///
/// # Example
///
/// ```
/// use ga4_export::core::merge::merge;
/// use ga4_export::domain::ReportResponse;
///
/// let a = ReportResponse::new(["date"], ["engagementRate"])
///     .with_row(["20240101"], ["0.5"]);
/// let b = ReportResponse::new(["date"], ["newUsers"])
///     .with_row(["20240101"], ["10"])
///     .with_row(["20240102"], ["5"]);
///
/// let table = merge(&[a, b], 0).unwrap();
/// assert_eq!(table.header(), vec!["date", "engagementRate", "newUsers"]);
/// assert_eq!(table.row_count(), 2);
/// assert_eq!(table.value(1, "engagementRate"), None);
/// ```
pub fn merge(responses: &[ReportResponse], join_key_index: usize) -> Result<MergedTable> {
    if responses.is_empty() {
        return Err(Ga4Error::EmptyInput(
            "merge requires at least one report response".to_string(),
        ));
    }

    let key_column = responses
        .iter()
        .find_map(|r| r.dimension_headers.get(join_key_index))
        .cloned()
        .unwrap_or_else(|| FALLBACK_KEY_COLUMN.to_string());

    let mut columns: Vec<String> = Vec::new();
    let mut column_index: HashMap<String, usize> = HashMap::new();
    let mut rows: BTreeMap<(String, usize), Vec<Option<String>>> = BTreeMap::new();

    for (batch, response) in responses.iter().enumerate() {
        if response.metric_headers.iter().any(|name| *name == key_column) {
            return Err(Ga4Error::InvalidResponse(format!(
                "batch {} has a metric named '{key_column}', which is the join-key column",
                batch + 1
            )));
        }

        let existing = columns.len();
        let targets: Vec<usize> = response
            .metric_headers
            .iter()
            .map(|name| {
                *column_index.entry(name.clone()).or_insert_with(|| {
                    columns.push(name.clone());
                    columns.len() - 1
                })
            })
            .collect();

        // Columns taken over from an earlier batch start empty again
        let mut overwritten: Vec<usize> =
            targets.iter().copied().filter(|&c| c < existing).collect();
        overwritten.sort_unstable();
        overwritten.dedup();
        if !overwritten.is_empty() {
            tracing::debug!(
                batch = batch + 1,
                columns = ?overwritten.iter().map(|&c| columns[c].as_str()).collect::<Vec<_>>(),
                "Later batch overwrites same-named metric columns"
            );
            for values in rows.values_mut() {
                for &column in &overwritten {
                    if let Some(cell) = values.get_mut(column) {
                        *cell = None;
                    }
                }
            }
        }

        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for (row_number, row) in response.rows.iter().enumerate() {
            let key = row.dimension_values.get(join_key_index).ok_or_else(|| {
                Ga4Error::InvalidResponse(format!(
                    "batch {} row {row_number} has {} dimension value(s), join key index is {join_key_index}",
                    batch + 1,
                    row.dimension_values.len()
                ))
            })?;

            let occurrence = occurrences.entry(key.as_str()).or_insert(0);
            let values = rows.entry((key.clone(), *occurrence)).or_default();
            *occurrence += 1;

            if values.len() < columns.len() {
                values.resize(columns.len(), None);
            }
            for (metric, &column) in targets.iter().enumerate() {
                values[column] = row.metric_values.get(metric).cloned();
            }
        }
    }

    let rows = rows
        .into_iter()
        .map(|((key, _), values)| MergedRow { key, values })
        .collect();

    Ok(MergedTable::new(key_column, columns, rows))
}
