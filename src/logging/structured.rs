//! Subscriber setup
//!
//! Console output is always on. A rolling JSON file layer is added when
//! `logging.local_enabled` is set; its worker guard lives in [`LoggingGuard`].

use crate::config::LoggingConfig;
use crate::domain::{Ga4Error, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const LOG_FILE_PREFIX: &str = "ga4-export.log";
const LOG_LEVELS: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the file writer alive; drop it last so buffered lines are flushed
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG` takes precedence over `level` when set.
///
/// # Errors
///
/// Returns [`Ga4Error::Configuration`] for an unknown level, an unusable log
/// directory, or when a global subscriber is already installed.
///
/// ```no_run
/// use ga4_export::config::LoggingConfig;
/// use ga4_export::logging::init_logging;
///
/// let _guard = init_logging("debug", &LoggingConfig::default()).unwrap();
/// ```
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = env_filter(parse_log_level(level)?);

    let console: BoxedLayer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter.clone())
        .boxed();
    let mut layers = vec![console];

    let file_guard = if config.local_enabled {
        let (layer, guard) = file_layer(config, filter)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| Ga4Error::Configuration(format!("Failed to install log subscriber: {e}")))?;

    tracing::debug!(
        level = %level,
        file_logging = config.local_enabled,
        log_dir = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)))
}

fn default_directives(level: Level) -> String {
    format!("ga4_export={level},axum={level}")
}

fn file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    let dir = Path::new(&config.local_path);
    std::fs::create_dir_all(dir).map_err(|e| {
        Ga4Error::Configuration(format!(
            "Failed to create log directory {}: {e}",
            dir.display()
        ))
    })?;

    let appender = RollingFileAppender::new(rotation(&config.local_rotation), dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_current_span(false)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

/// Unknown values fall back to daily; the config validator rejects them first
fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    let wanted = level.trim().to_ascii_lowercase();
    LOG_LEVELS
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, level)| *level)
        .ok_or_else(|| {
            Ga4Error::Configuration(format!(
                "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
            ))
        })
}
