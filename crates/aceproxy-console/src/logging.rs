//! Logging bootstrap for the console
//!
//! Console output for interactive use plus a rolling `console.log` file
//! with daily rotation. The log directory defaults to
//! `~/aceproxy/logs`; override with `ACEPROXY_LOG_DIR`.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Logging configuration for the console process.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log directory (default: `~/aceproxy/logs`)
    pub log_dir: PathBuf,
    /// Enable console output
    pub console_output: bool,
    /// Enable file logging
    pub file_logging: bool,
    /// Default level for both layers
    pub level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        Self {
            log_dir: PathBuf::from(format!("{}/aceproxy/logs", home)),
            console_output: true,
            file_logging: true,
            level: Level::INFO,
        }
    }
}

impl LoggingConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let log_dir = std::env::var("ACEPROXY_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(format!("{}/aceproxy/logs", home))
            });

        let console_output = std::env::var("ACEPROXY_LOG_CONSOLE")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let file_logging = std::env::var("ACEPROXY_LOG_FILE")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        let level = std::env::var("ACEPROXY_LOG_LEVEL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::INFO);

        Self {
            log_dir,
            console_output,
            file_logging,
            level,
        }
    }
}

/// Guard that keeps the logging system alive.
///
/// Must be kept for the duration of the process; dropping it flushes
/// any buffered file output.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level for both
/// layers.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console_output {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
        let console_layer = fmt::layer().with_target(true).with_filter(filter);
        layers.push(Box::new(console_layer));
    }

    if config.file_logging {
        let appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "console.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        guards.push(guard);

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));
        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .with_filter(filter);
        layers.push(Box::new(file_layer));
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    tracing::info!(
        log_dir = %config.log_dir.display(),
        "Console logging initialized"
    );

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}
