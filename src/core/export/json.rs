use crate::domain::{Ga4Error, MergedTable, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes newline-delimited JSON, one object per row, keys in column order.
///
/// Null cells are written as `null`.
pub fn write_json(table: &MergedTable, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Ga4Error::write(path.display(), e))?;
    let mut writer = BufWriter::new(file);

    for record in table.records() {
        serde_json::to_writer(&mut writer, &record)
            .map_err(|e| Ga4Error::write(path.display(), e))?;
        writer
            .write_all(b"\n")
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
    fn test_write_json_lines() {
        let table = MergedTable::new(
            "date",
            vec!["newUsers".to_string(), "engagementRate".to_string()],
            vec![MergedRow {
                key: "20240101".to_string(),
                values: vec![Some("10".to_string()), None],
            }],
        );
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_json(&table, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "{\"date\":\"20240101\",\"newUsers\":\"10\",\"engagementRate\":null}\n"
        );
    }

    #[test]
    fn test_write_json_empty_table() {
        let table = MergedTable::new("date", vec!["newUsers".to_string()], vec![]);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.json");

        write_json(&table, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
