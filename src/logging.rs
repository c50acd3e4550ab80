//! Logging setup for the dashboard.
//!
//! The TUI owns the terminal, so log output goes to a file instead of
//! stderr. The filter comes from the `SCD_LOG` environment variable when
//! set, otherwise from the `[log] level` config value.
//!
//! ```bash
//! # Debug-level logging
//! SCD_LOG=debug scd tui
//!
//! # Module-specific filtering
//! SCD_LOG=sensor_console=debug,warn scd tui
//! ```

use std::fs::OpenOptions;
use std::path::PathBuf;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::{LogConfig, LogLevel};
use crate::config::xdg;

/// Initialize the tracing subscriber with a file writer.
///
/// Resolution:
/// - Filter: `SCD_LOG` env var, falling back to the configured level.
///   `level = "off"` with no env override skips initialization entirely.
/// - File: the configured path, or `scd.log` under the state dir when the
///   config value is empty.
///
/// Failure to open the log file is not fatal; the dashboard runs without
/// logging and the error goes to stderr before the TUI takes over.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (should only be
/// called once, at startup).
pub fn init(config: &LogConfig) {
    let filter = match EnvFilter::try_from_env("SCD_LOG") {
        Ok(filter) => filter,
        Err(_) => {
            if config.level == LogLevel::Off {
                return;
            }
            EnvFilter::new(config.level.as_filter_str())
        }
    };

    let path = log_path(config);
    if let Some(parent) = path.parent() {
        if let Err(e) = xdg::ensure_dir(parent) {
            eprintln!("warning: could not create log directory {}: {}", parent.display(), e);
            return;
        }
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: could not open log file {}: {}", path.display(), e);
            return;
        }
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(file))
        .init();
    tracing::debug!("logging to {}", path.display());
}

/// Resolves the log file path from config, defaulting under the state dir.
pub fn log_path(config: &LogConfig) -> PathBuf {
    if config.file.is_empty() {
        xdg::default_log_path()
    } else {
        PathBuf::from(&config.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tracing_subscriber::EnvFilter;

    #[test]
    fn env_filter_parses_valid_directives() {
        let directives = ["info", "debug", "warn", "error", "trace", "off"];
        for d in directives {
            let filter = EnvFilter::try_new(d);
            assert!(filter.is_ok(), "failed to parse directive: {}", d);
        }
    }

    #[test]
    fn env_filter_parses_module_directive() {
        let filter = EnvFilter::try_new("sensor_console=debug,warn");
        assert!(filter.is_ok());
    }

    #[test]
    fn log_path_uses_configured_file() {
        let config = LogConfig {
            level: LogLevel::Info,
            file: "/tmp/custom.log".to_string(),
        };
        assert_eq!(log_path(&config), PathBuf::from("/tmp/custom.log"));
    }

    #[test]
    #[serial]
    fn log_path_empty_falls_back_to_state_dir() {
        let original = std::env::var("XDG_STATE_HOME").ok();
        std::env::set_var("XDG_STATE_HOME", "/custom/state");
        let config = LogConfig::default();
        assert_eq!(
            log_path(&config),
            PathBuf::from("/custom/state/sensor-console/scd.log")
        );
        match original {
            Some(v) => std::env::set_var("XDG_STATE_HOME", v),
            None => std::env::remove_var("XDG_STATE_HOME"),
        }
    }
}
