//! Structured logging via the `tracing` crate.
//!
//! Command results and the profiling report go to stdout; diagnostics go
//! through tracing, to stderr by default so they never mix with command
//! output. Level, format, and destination come from CLI flags, `ANVIL_LOG*`
//! environment variables, or the configuration file, in that precedence.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format: text or json
    #[serde(default = "default_format")]
    pub format: String,

    /// Destination: stderr, stdout, or file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is "file"
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Colored output (text format on a terminal destination only)
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_color(),
        }
    }
}

/// Default log file location inside a bench root.
pub fn default_log_file(sites_path: &std::path::Path) -> PathBuf {
    sites_path.join("logs").join("anvil.log")
}

/// Initialize the global tracing subscriber.
///
/// `ANVIL_LOG` overrides the configured level with a full filter directive;
/// `ANVIL_LOG_FORMAT` and `ANVIL_LOG_OUTPUT` override format and destination.
pub fn init_logging(config: &LoggingConfig) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_env("ANVIL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let format = std::env::var("ANVIL_LOG_FORMAT").unwrap_or_else(|_| config.format.clone());
    let output = std::env::var("ANVIL_LOG_OUTPUT").unwrap_or_else(|_| config.output.clone());

    if format != "text" && format != "json" {
        return Err(CliError::ConfigError(format!(
            "Invalid log format: {} (must be 'text' or 'json')",
            format
        )));
    }

    let base = Registry::default().with(filter);

    match output.as_str() {
        "file" => {
            let path = config.file.clone().ok_or_else(|| {
                CliError::ConfigError("Log output is 'file' but no file path is set".to_string())
            })?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let writer = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            if format == "json" {
                base.with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(writer),
                )
                .init();
            } else {
                base.with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            }
        }
        "stdout" => {
            if format == "json" {
                base.with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stdout),
                )
                .init();
            } else {
                base.with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(config.color)
                        .with_writer(std::io::stdout),
                )
                .init();
            }
        }
        "stderr" => {
            if format == "json" {
                base.with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_writer(std::io::stderr),
                )
                .init();
            } else {
                base.with(
                    fmt::layer()
                        .with_target(true)
                        .with_timer(ChronoUtc::rfc_3339())
                        .with_ansi(config.color)
                        .with_writer(std::io::stderr),
                )
                .init();
            }
        }
        other => {
            return Err(CliError::ConfigError(format!(
                "Invalid log output: {} (must be 'stderr', 'stdout', or 'file')",
                other
            )));
        }
    }

    Ok(())
}
