// ga4-export - GA4 report batch fetch, merge and export
// Copyright (c) 2025 ga4-export Contributors
// Licensed under the MIT License

use clap::Parser;
use ga4_export::cli::{Cli, Commands};
use ga4_export::config::{load_config, LoggingConfig};
use ga4_export::logging::init_logging;
use std::process;
use tokio::sync::watch;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; commands
    // report config errors themselves
    let (config_level, logging_config) = match &cli.command {
        Commands::Init(_) => (None, LoggingConfig::default()),
        _ => match load_config(&cli.config) {
            Ok(config) => (Some(config.application.log_level), config.logging),
            Err(_) => (None, LoggingConfig::default()),
        },
    };
    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let _guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "ga4-export - GA4 report batch fetch, merge and export"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), shutting down");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, shutting down");
                }
            }
            let _ = shutdown_tx.send(true);
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), shutting down");
                let _ = shutdown_tx.send(true);
            }
        }
    });

    let exit_code = match execute_command(&cli, shutdown_rx).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, shutdown_signal: watch::Receiver<bool>) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Run(args) => args.execute(&cli.config).await,
        Commands::Serve(args) => args.execute(&cli.config, shutdown_signal).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
