//! Merge behaviour across realistic batch shapes

use ga4_export::core::merge::merge;
use ga4_export::domain::{Ga4Error, ReportResponse};

fn batch(metrics: &[&str], rows: &[(&str, &[&str])]) -> ReportResponse {
    rows.iter().fold(
        ReportResponse::new(["date"], metrics.iter().copied()),
        |response, (date, values)| response.with_row([*date], values.iter().copied()),
    )
}

fn engagement_batch() -> ReportResponse {
    batch(
        &["engagementRate", "activeUsers"],
        &[
            ("20240101", &["0.61", "120"]),
            ("20240102", &["0.58", "131"]),
            ("20240103", &["0.64", "118"]),
        ],
    )
}

fn revenue_batch() -> ReportResponse {
    batch(
        &["totalRevenue", "newUsers"],
        &[("20240102", &["12.50", "14"]), ("20240104", &["3.10", "9"])],
    )
}

#[test]
fn test_two_batches_with_partial_overlap() {
    let table = merge(&[engagement_batch(), revenue_batch()], 0).unwrap();

    assert_eq!(
        table.header(),
        vec!["date", "engagementRate", "activeUsers", "totalRevenue", "newUsers"]
    );
    let keys: Vec<&str> = table.rows().iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["20240101", "20240102", "20240103", "20240104"]);

    // 20240102 is present in both batches
    assert_eq!(table.value(1, "engagementRate"), Some("0.58"));
    assert_eq!(table.value(1, "totalRevenue"), Some("12.50"));

    // Keys missing from a batch leave that batch's columns null
    assert_eq!(table.value(0, "totalRevenue"), None);
    assert_eq!(table.value(0, "newUsers"), None);
    assert_eq!(table.value(3, "engagementRate"), None);
    assert_eq!(table.value(3, "newUsers"), Some("9"));
}

#[test]
fn test_row_count_is_bounded_by_batch_sizes() {
    let batches = [engagement_batch(), revenue_batch()];
    let largest = batches.iter().map(ReportResponse::row_count).max().unwrap();
    let total: usize = batches.iter().map(ReportResponse::row_count).sum();

    let table = merge(&batches, 0).unwrap();

    assert!(table.row_count() >= largest);
    assert!(table.row_count() <= total);
}

#[test]
fn test_column_count_is_key_plus_distinct_metrics() {
    let third = batch(&["bounceRate"], &[("20240101", &["0.2"])]);
    let table = merge(&[engagement_batch(), revenue_batch(), third], 0).unwrap();

    assert_eq!(table.column_count(), 1 + 5);
    assert!(table.rows().iter().all(|r| r.values.len() == 5));
}

#[test]
fn test_disjoint_batches_produce_union_of_rows() {
    let a = batch(&["activeUsers"], &[("20240101", &["1"])]);
    let b = batch(&["newUsers"], &[("20240201", &["2"])]);

    let table = merge(&[a, b], 0).unwrap();

    assert_eq!(table.row_count(), 2);
    assert_eq!(table.value(0, "activeUsers"), Some("1"));
    assert_eq!(table.value(0, "newUsers"), None);
    assert_eq!(table.value(1, "activeUsers"), None);
    assert_eq!(table.value(1, "newUsers"), Some("2"));
}

#[test]
fn test_same_metric_in_later_batch_wins() {
    let a = batch(
        &["activeUsers", "eventCount"],
        &[("20240101", &["10", "100"]), ("20240102", &["11", "110"])],
    );
    let b = batch(&["activeUsers"], &[("20240101", &["99"])]);

    let table = merge(&[a, b], 0).unwrap();

    assert_eq!(table.header(), vec!["date", "activeUsers", "eventCount"]);
    assert_eq!(table.value(0, "activeUsers"), Some("99"));
    assert_eq!(table.value(1, "activeUsers"), None);
    assert_eq!(table.value(1, "eventCount"), Some("110"));
}

#[test]
fn test_batches_without_rows_still_contribute_columns() {
    let empty = ReportResponse::new(["date"], ["crashAffectedUsers"]);
    let table = merge(&[engagement_batch(), empty], 0).unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_count(), 4);
    assert!((0..3).all(|row| table.value(row, "crashAffectedUsers").is_none()));
}

#[test]
fn test_join_on_second_dimension() {
    let a = ReportResponse::new(["adUnitName", "date"], ["totalAdRevenue"])
        .with_row(["banner", "20240101"], ["1.5"]);
    let b = ReportResponse::new(["adUnitName", "date"], ["activeUsers"])
        .with_row(["interstitial", "20240101"], ["7"]);

    let table = merge(&[a, b], 1).unwrap();

    assert_eq!(table.key_column(), "date");
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.value(0, "totalAdRevenue"), Some("1.5"));
    assert_eq!(table.value(0, "activeUsers"), Some("7"));
}

#[test]
fn test_no_batches_is_rejected() {
    let err = merge(&[], 0).unwrap_err();
    assert!(matches!(err, Ga4Error::EmptyInput(_)));
}
