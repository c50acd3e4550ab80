//! TOML configuration schema types for the Sensor Console Dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults
//! via `#[serde(default)]`, so a partial file fills in the rest.
//!
//! Duration fields use human-readable strings (e.g. `"5s"`, `"250ms"`)
//! parsed by the `humantime` crate at the call site.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [ui]
/// [simulator]
/// [device]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// TUI appearance and behavior settings.
    pub ui: UiConfig,
    /// Sensor simulator timing and thresholds.
    pub simulator: SimulatorConfig,
    /// Monitored device identity and location.
    pub device: DeviceConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// TUI behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Render tick rate as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
        }
    }
}

/// Sensor simulator configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Interval between alert-check readings.
    pub alert_interval: String,
    /// Interval between live gauge updates.
    pub gauge_interval: String,
    /// How long an alert stays visible before auto-expiring.
    pub alert_ttl: String,
    /// Readings above this raise a warning alert.
    pub warning_threshold: u8,
    /// Readings above this raise a danger alert.
    pub danger_threshold: u8,
    /// Lower clamp for the live gauge temperature.
    pub gauge_min: f64,
    /// Upper clamp for the live gauge temperature.
    pub gauge_max: f64,
    /// Full-scale value the gauge ratio is computed against.
    pub gauge_scale: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            alert_interval: "5s".to_string(),
            gauge_interval: "1s".to_string(),
            alert_ttl: "10s".to_string(),
            warning_threshold: 50,
            danger_threshold: 70,
            gauge_min: 26.0,
            gauge_max: 28.0,
            gauge_scale: 50.0,
        }
    }
}

/// Identity and location of the monitored device.
///
/// The coordinate drives the map widget's marker; nothing here is a
/// credential.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Device display name.
    pub name: String,
    /// Human-readable location shown in the info popup.
    pub location: String,
    /// Status line shown in the info popup.
    pub status: String,
    /// Device latitude in degrees.
    pub latitude: f64,
    /// Device longitude in degrees.
    pub longitude: f64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "sensor-hub-01".to_string(),
            location: "San Francisco".to_string(),
            status: "Active".to_string(),
            latitude: 37.7749,
            longitude: -122.4194,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Logging verbosity level.
    pub level: LogLevel,
    /// Path to the log file. Empty string means the default state-dir path.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

/// Logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Logging disabled entirely.
    Off,
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// General operational information.
    Info,
    /// Detailed debugging information.
    Debug,
    /// Very verbose, includes all internal operations.
    Trace,
}

impl LogLevel {
    /// Directive string accepted by `tracing_subscriber::EnvFilter`.
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Parses a humantime duration string, falling back to `default` when the
/// string is malformed.
///
/// Config duration fields are advisory; a typo degrades to the built-in
/// default rather than refusing to start.
pub fn parse_duration_or(value: &str, default: Duration) -> Duration {
    match humantime::parse_duration(value) {
        Ok(duration) => duration,
        Err(e) => {
            tracing::warn!("invalid duration {value:?}, using {default:?}: {e}");
            default
        }
    }
}
