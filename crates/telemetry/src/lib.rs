//! Logging and operation timing for the Event Manager client tools
//!
//! - Structured logging with `tracing`, to stderr and optionally to a
//!   daily-rolling log file
//! - A per-process session id for correlating log lines
//! - Timers for slow operations

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// File name prefix used by the rolling log appender
pub const LOG_FILE_PREFIX: &str = "eventmanager.log";

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Initialize the telemetry system with defaults
pub fn init() -> anyhow::Result<()> {
    init_with_config(TelemetryConfig::default())
}

/// Initialize with custom configuration
pub fn init_with_config(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let (compact, json) = if config.json {
        let layer = fmt::layer()
            .json()
            .with_target(config.show_target)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    } else {
        let layer = fmt::layer()
            .with_target(config.show_target)
            .with_file(config.show_file)
            .with_line_number(config.show_line_number)
            .with_ansi(config.ansi)
            .with_writer(std::io::stderr)
            .compact();
        (Some(layer), None)
    };

    let file = match &config.log_dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .build(dir)
                .map_err(|e| anyhow::anyhow!("Cannot log to {}: {e}", dir.display()))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(appender),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(compact)
        .with(json)
        .with(file);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {e}"))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        log_dir = ?config.log_dir,
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Log level for the CLI verbosity flags: `-v` debug, `-vv` trace, `--quiet` error
#[must_use]
pub fn level_for_verbosity(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Filter directive used when `RUST_LOG` is not set
    pub log_level: String,
    /// Emit JSON lines instead of compact text
    pub json: bool,
    /// Also write logs to a daily-rolling file in this directory
    pub log_dir: Option<PathBuf>,
    /// ANSI colors on stderr
    pub ansi: bool,
    pub show_target: bool,
    pub show_file: bool,
    pub show_line_number: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            log_dir: None,
            ansi: true,
            show_target: false,
            show_file: false,
            show_line_number: false,
        }
    }
}

impl TelemetryConfig {
    /// Configuration for the given CLI verbosity flags
    #[must_use]
    pub fn for_verbosity(verbose: u8, quiet: bool) -> Self {
        Self {
            log_level: level_for_verbosity(verbose, quiet).to_string(),
            show_target: verbose > 1,
            ..Self::default()
        }
    }

    /// Emit JSON lines
    #[must_use]
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Toggle ANSI colors
    #[must_use]
    pub fn ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Write a rolling log file into `dir`
    #[must_use]
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }
}

/// Timer for measuring operation duration
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Time since the timer started
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Operation completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0, false), "warn");
        assert_eq!(level_for_verbosity(1, false), "debug");
        assert_eq!(level_for_verbosity(2, false), "trace");
        assert_eq!(level_for_verbosity(5, false), "trace");
        assert_eq!(level_for_verbosity(2, true), "error");
    }

    #[test]
    fn test_config_builders() {
        let dir = tempfile::tempdir().unwrap();
        let config = TelemetryConfig::for_verbosity(2, false)
            .json(true)
            .ansi(false)
            .log_dir(dir.path());

        assert_eq!(config.log_level, "trace");
        assert!(config.show_target);
        assert!(config.json);
        assert!(!config.ansi);
        assert_eq!(config.log_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn test_unusable_log_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = init_with_config(TelemetryConfig::default().log_dir(blocker.join("logs")));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Cannot log to"), "{err}");
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("test_operation");
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(id, session_id());
    }
}
