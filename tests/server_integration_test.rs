//! HTTP trigger tests: a real listener on an ephemeral port, driven with reqwest

use ga4_export::config::{parse_config, secret_string, Ga4Config};
use ga4_export::server::{router, AppState};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;

fn config(api_url: &str, output_dir: &Path) -> Ga4Config {
    parse_config(&format!(
        r#"
[api]
base_url = '{api_url}'

[report]
metric_batches = [["activeUsers"], ["newUsers"]]

[report.date_range]
start = "7daysAgo"
end = "yesterday"

[properties]
"111" = "Smarty-Jacket"

[output]
directory = '{}'
formats = ["xlsx", "csv"]
"#,
        output_dir.display()
    ))
    .unwrap()
}

async fn spawn_server(config: Ga4Config) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(Arc::new(AppState::new(config)));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn report_body(metric: &str, rows: &[(&str, &str)]) -> String {
    json!({
        "dimensionHeaders": [{"name": "date"}],
        "metricHeaders": [{"name": metric, "type": "TYPE_INTEGER"}],
        "rows": rows.iter().map(|(date, value)| json!({
            "dimensionValues": [{"value": date}],
            "metricValues": [{"value": value}],
        })).collect::<Vec<_>>(),
    })
    .to_string()
}

#[tokio::test]
async fn test_health() {
    let dir = TempDir::new().unwrap();
    let addr = spawn_server(config("http://127.0.0.1:1", dir.path())).await;

    let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_fetch_success_writes_files() {
    let mut api = mockito::Server::new_async().await;
    let _active = api
        .mock("POST", "/v1beta/properties/111:runReport")
        .match_header("authorization", "Bearer static-token")
        .match_body(mockito::Matcher::PartialJson(json!({"metrics": [{"name": "activeUsers"}]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(report_body("activeUsers", &[("20240101", "120"), ("20240102", "131")]))
        .create_async()
        .await;
    let _new = api
        .mock("POST", "/v1beta/properties/111:runReport")
        .match_header("authorization", "Bearer static-token")
        .match_body(mockito::Matcher::PartialJson(json!({"metrics": [{"name": "newUsers"}]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(report_body("newUsers", &[("20240102", "9")]))
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = config(&api.url(), dir.path());
    config.credentials.key_file = None;
    config.credentials.access_token = Some(secret_string("static-token".to_string()));
    let addr = spawn_server(config).await;

    let resp = reqwest::get(format!("http://{addr}/fetch-ga4-data/")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Data fetched and processed successfully"}));

    let csv = std::fs::read_to_string(dir.path().join("Smarty-Jacket.csv")).unwrap();
    assert_eq!(
        csv.lines().collect::<Vec<_>>(),
        vec!["date,activeUsers,newUsers", "20240101,120,", "20240102,131,9"]
    );
    assert!(dir.path().join("Smarty-Jacket.xlsx").exists());
}

#[tokio::test]
async fn test_invalid_key_file_is_unauthorized() {
    let dir = TempDir::new().unwrap();
    let key_path = dir.path().join("key.json");
    std::fs::write(&key_path, "{ not a key").unwrap();

    let out = dir.path().join("out");
    let mut config = config("http://127.0.0.1:1", &out);
    config.credentials.key_file = Some(key_path.to_string_lossy().into_owned());
    let addr = spawn_server(config).await;

    let resp = reqwest::get(format!("http://{addr}/fetch-ga4-data/")).await.unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("not a valid service-account key"));
    assert!(!out.exists());
}

#[tokio::test]
async fn test_upstream_outage_is_service_unavailable() {
    let mut api = mockito::Server::new_async().await;
    let _down = api
        .mock("POST", "/v1beta/properties/111:runReport")
        .with_status(503)
        .with_body(r#"{"error": {"code": 503, "message": "Backend unavailable", "status": "UNAVAILABLE"}}"#)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let mut config = config(&api.url(), dir.path());
    config.credentials.key_file = None;
    config.credentials.access_token = Some(secret_string("static-token".to_string()));
    let addr = spawn_server(config).await;

    let resp = reqwest::get(format!("http://{addr}/fetch-ga4-data")).await.unwrap();

    assert_eq!(resp.status(), 503);
    let body: Value = resp.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("111"));
    assert!(message.contains("Backend unavailable"));
    assert!(!dir.path().join("Smarty-Jacket.csv").exists());
}
