//! HTTP trigger for the report pipeline
//!
//! - `GET /fetch-ga4-data/` runs the pipeline once and reports the outcome
//! - `GET /health` reports liveness and the crate version

pub mod error;
pub mod handlers;

use crate::config::Ga4Config;
use crate::domain::{Ga4Error, Result};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub use error::ApiError;

/// Application state shared across handlers
pub struct AppState {
    pub config: Ga4Config,
    /// Held for the duration of a pipeline run
    pub run_lock: Mutex<()>,
}

impl AppState {
    pub fn new(config: Ga4Config) -> Self {
        Self {
            config,
            run_lock: Mutex::new(()),
        }
    }
}

/// Build the axum router with all routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/fetch-ga4-data/", get(handlers::fetch_ga4_data))
        .route("/fetch-ga4-data", get(handlers::fetch_ga4_data))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Serves on an already bound listener until `shutdown` resolves
pub async fn serve_on<F>(listener: TcpListener, config: Ga4Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(Arc::new(AppState::new(config)));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Ga4Error::Io(format!("HTTP server failed: {e}")))
}

/// Binds `server.host:server.port` and serves until `shutdown` resolves
///
/// # Errors
///
/// Returns [`Ga4Error::Io`] if the address cannot be bound.
pub async fn serve<F>(config: Ga4Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Ga4Error::Io(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(
        address = %addr,
        properties = config.properties.len(),
        "HTTP server listening"
    );

    serve_on(listener, config, shutdown).await
}
