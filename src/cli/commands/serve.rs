//! Serve command implementation
//!
//! Starts the HTTP server exposing `GET /fetch-ga4-data/`. Configuration is
//! loaded once at startup; credentials are read on every request.

use crate::config::{load_config, Ga4Config};
use crate::server;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override bind port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        mut shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ {e}");
                return Ok(e.exit_code());
            }
        };

        self.apply_overrides(&mut config);

        println!("🌐 ga4-export server");
        println!("   URL: http://{}/fetch-ga4-data/", config.server.bind_address());
        println!("   Properties: {}", config.properties.len());
        println!();
        println!("   Press Ctrl+C to stop");

        let shutdown = async move {
            let _ = shutdown_signal.changed().await;
            tracing::info!("Shutting down HTTP server");
        };

        match server::serve(config, shutdown).await {
            Ok(()) => Ok(0),
            Err(e) => {
                tracing::error!(error = %e, "HTTP server failed");
                eprintln!("❌ {e}");
                Ok(5)
            }
        }
    }

    fn apply_overrides(&self, config: &mut Ga4Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}
