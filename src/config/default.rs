//! Default configuration template and file creation utilities.
//!
//! Provides a well-commented TOML template that matches `Config::default()`
//! and functions to write it to the XDG config path.

use std::fs;
use std::path::PathBuf;

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A well-commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
/// Sections: `[ui]`, `[simulator]`, `[device]`, `[log]`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Sensor Console Dashboard Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
# Uncomment and modify options to customize your dashboard.
#
# Location: $XDG_CONFIG_HOME/sensor-console/config.toml

# ==============================================================================
# UI Configuration
# ==============================================================================

[ui]

# Render tick rate as a human-readable duration.
# Controls how often the TUI redraws. Lower values = smoother but more CPU.
# Examples: "250ms", "500ms", "1s"
tick_rate = "250ms"

# ==============================================================================
# Simulator Configuration
# ==============================================================================

[simulator]

# Interval between alert-check readings.
# Every interval a temperature reading in 0..100 is drawn and classified.
alert_interval = "5s"

# Interval between live gauge updates.
gauge_interval = "1s"

# How long an alert notification stays visible before auto-expiring.
alert_ttl = "10s"

# Readings strictly above this value raise a warning alert.
warning_threshold = 50

# Readings strictly above this value raise a danger alert instead.
danger_threshold = 70

# Clamp bounds for the live gauge temperature drift.
gauge_min = 26.0
gauge_max = 28.0

# Full-scale value the gauge fill ratio is computed against.
gauge_scale = 50.0

# ==============================================================================
# Device Configuration
# ==============================================================================

[device]

# Display name of the monitored device.
name = "sensor-hub-01"

# Human-readable location shown in the map info popup.
location = "San Francisco"

# Status line shown in the map info popup.
status = "Active"

# Device coordinate driving the map marker.
latitude = 37.7749
longitude = -122.4194

# ==============================================================================
# Logging Configuration
# ==============================================================================

[log]

# Logging verbosity level.
# Options: "off", "error", "warn", "info", "debug", "trace"
level = "info"

# Path to the log file. Empty string means the default location under the
# state directory. The TUI owns the terminal, so logs never go to stderr.
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path: path.clone() });
        }
        // Back up existing file
        let backup_path = path.with_extension("toml.backup");
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &PathBuf) -> Result<(), ConfigError> {
    xdg::ensure_config_dir().map_err(|e| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    })?;

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::WriteError {
                path: path.clone(),
                source: e,
            }
        })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
