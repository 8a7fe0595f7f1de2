//! Request handlers

use super::error::ApiError;
use super::AppState;
use crate::adapters::ga4::Ga4Client;
use crate::core::pipeline::ReportPipeline;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

pub const SUCCESS_MESSAGE: &str = "Data fetched and processed successfully";

#[derive(Debug, Serialize)]
pub struct FetchResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /fetch-ga4-data/ - run the whole pipeline once
///
/// Runs are serialized; a second request waits for the first to finish.
/// The client is built per request so credential problems surface as a
/// failed request rather than a failed server.
pub async fn fetch_ga4_data(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FetchResponse>, ApiError> {
    let _guard = state.run_lock.lock().await;
    tracing::info!("Pipeline run requested over HTTP");

    let client = Ga4Client::from_config(&state.config)?;
    let pipeline = ReportPipeline::new(&state.config, Arc::new(client))?;
    let summary = pipeline.run().await?;

    tracing::info!(
        properties = summary.properties.len(),
        files = summary.total_files(),
        "Pipeline run finished"
    );

    Ok(Json(FetchResponse {
        message: SUCCESS_MESSAGE.to_string(),
    }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
