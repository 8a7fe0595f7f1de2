use crate::domain::{Ga4Error, MergedTable, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes the table as CSV: header row, no index column, nulls as empty fields.
pub fn write_csv(table: &MergedTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Ga4Error::write(path.display(), e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));

    writer
        .write_record(table.header())
        .map_err(|e| Ga4Error::write(path.display(), e))?;

    for row in table.rows() {
        let record = std::iter::once(row.key.as_str())
            .chain(row.values.iter().map(|v| v.as_deref().unwrap_or_default()));
        writer
            .write_record(record)
            .map_err(|e| Ga4Error::write(path.display(), e))?;
    }

    writer.flush().map_err(|e| Ga4Error::write(path.display(), e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MergedRow;
    use tempfile::TempDir;

    #[test]
    fn test_write_csv_with_nulls_and_quoting() {
        let table = MergedTable::new(
            "date",
            vec!["pagePath, title".to_string(), "newUsers".to_string()],
            vec![
                MergedRow {
                    key: "20240101".to_string(),
                    values: vec![Some("a,b".to_string()), None],
                },
                MergedRow {
                    key: "20240102".to_string(),
                    values: vec![None, Some("5".to_string())],
                },
            ],
        );
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        write_csv(&table, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "date,\"pagePath, title\",newUsers\n20240101,\"a,b\",\n20240102,,5\n"
        );
    }
}
