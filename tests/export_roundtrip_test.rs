//! Exported files read back with independent parsers

use ga4_export::core::export::{export, output_path};
use ga4_export::domain::{Ga4Error, MergedRow, MergedTable, OutputFormat, OutputName};
use std::collections::BTreeSet;
use tempfile::TempDir;

fn table() -> MergedTable {
    MergedTable::new(
        "date",
        vec![
            "engagementRate".to_string(),
            "totalRevenue".to_string(),
            "newUsers".to_string(),
        ],
        vec![
            MergedRow {
                key: "20240101".to_string(),
                values: vec![Some("0.61".to_string()), None, Some("14".to_string())],
            },
            MergedRow {
                key: "20240102".to_string(),
                values: vec![
                    Some("0.58".to_string()),
                    Some("1,204.50".to_string()),
                    None,
                ],
            },
        ],
    )
}

fn all_formats() -> BTreeSet<OutputFormat> {
    [OutputFormat::Xlsx, OutputFormat::Csv, OutputFormat::Json]
        .into_iter()
        .collect()
}

#[test]
fn test_csv_reads_back_with_header_and_empty_nulls() {
    let dir = TempDir::new().unwrap();
    let name = OutputName::new("Smarty-Jacket").unwrap();
    let formats: BTreeSet<_> = [OutputFormat::Csv].into_iter().collect();

    export(&table(), dir.path(), &name, &formats).unwrap();

    let mut reader = csv::Reader::from_path(dir.path().join("Smarty-Jacket.csv")).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(headers, vec!["date", "engagementRate", "totalRevenue", "newUsers"]);

    let records: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    assert_eq!(
        records,
        vec![
            vec!["20240101", "0.61", "", "14"],
            vec!["20240102", "0.58", "1,204.50", ""],
        ]
    );
}

#[test]
fn test_json_lines_parse_as_objects() {
    let dir = TempDir::new().unwrap();
    let name = OutputName::new("Screen-Cast").unwrap();
    let formats: BTreeSet<_> = [OutputFormat::Json].into_iter().collect();

    export(&table(), dir.path(), &name, &formats).unwrap();

    let contents = std::fs::read_to_string(dir.path().join("Screen-Cast.json")).unwrap();
    let lines: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["date"], "20240101");
    assert_eq!(lines[0]["newUsers"], "14");
    assert!(lines[0]["totalRevenue"].is_null());
    assert_eq!(lines[1]["totalRevenue"], "1,204.50");
    assert!(lines[1]["newUsers"].is_null());
}

#[test]
fn test_all_formats_written_in_order() {
    let dir = TempDir::new().unwrap();
    let name = OutputName::new("Smarty-Jacket").unwrap();

    let written = export(&table(), dir.path(), &name, &all_formats()).unwrap();

    assert_eq!(
        written,
        vec![
            output_path(dir.path(), &name, OutputFormat::Xlsx),
            output_path(dir.path(), &name, OutputFormat::Csv),
            output_path(dir.path(), &name, OutputFormat::Json),
        ]
    );

    let xlsx = std::fs::read(&written[0]).unwrap();
    assert!(xlsx.starts_with(b"PK"));
}

#[test]
fn test_export_overwrites_previous_run() {
    let dir = TempDir::new().unwrap();
    let name = OutputName::new("Smarty-Jacket").unwrap();
    let formats: BTreeSet<_> = [OutputFormat::Csv].into_iter().collect();
    let path = dir.path().join("Smarty-Jacket.csv");
    std::fs::write(&path, "stale,contents\n1,2\n3,4\n5,6\n").unwrap();

    export(&table(), dir.path(), &name, &formats).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(!contents.contains("stale"));
    assert_eq!(contents.lines().count(), 3);
}

#[test]
fn test_empty_table_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let name = OutputName::new("Empty").unwrap();
    let empty = MergedTable::new("date", vec!["activeUsers".to_string()], Vec::new());

    let written = export(&empty, dir.path(), &name, &all_formats()).unwrap();
    assert_eq!(written.len(), 3);

    let csv = std::fs::read_to_string(dir.path().join("Empty.csv")).unwrap();
    assert_eq!(csv.trim_end(), "date,activeUsers");
    let json = std::fs::read_to_string(dir.path().join("Empty.json")).unwrap();
    assert!(json.is_empty());
}

#[test]
fn test_unwritable_directory_reports_path() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file").unwrap();
    let name = OutputName::new("Smarty-Jacket").unwrap();

    let err = export(&table(), &blocker.join("out"), &name, &all_formats()).unwrap_err();

    match err {
        Ga4Error::Write { path, .. } => assert!(path.contains("not-a-dir")),
        other => panic!("expected write error, got {other:?}"),
    }
}
