//! Platform-aware path resolution for sensor-console.
//!
//! On **Linux**, follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/sensor-console` or `~/.config/sensor-console`
//! - State (prefs, logs): `$XDG_STATE_HOME/sensor-console` or
//!   `~/.local/state/sensor-console`
//!
//! On **macOS**, uses Apple conventions with XDG env var overrides:
//! - Config: `$XDG_CONFIG_HOME/sensor-console` or
//!   `~/Library/Application Support/sensor-console`
//! - State: `$XDG_STATE_HOME/sensor-console` or
//!   `~/Library/Application Support/sensor-console`

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "sensor-console";

/// Returns the configuration directory for sensor-console.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/sensor-console` (if env var set, any platform)
/// 2. Platform default:
///    - Linux: `~/.config/sensor-console`
///    - macOS: `~/Library/Application Support/sensor-console`
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_config_dir().join(APP_NAME)
}

/// Platform-native config base directory (without XDG override).
fn platform_config_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support
        dirs::config_dir().expect("could not determine config directory")
    }
    #[cfg(not(target_os = "macos"))]
    {
        // ~/.config (XDG default on Linux)
        dirs::home_dir()
            .expect("could not determine home directory")
            .join(".config")
    }
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the state directory for durable-but-disposable files
/// (preferences, logs).
///
/// Resolution order:
/// 1. `$XDG_STATE_HOME/sensor-console` (if set, any platform)
/// 2. Platform default:
///    - Linux: `~/.local/state/sensor-console`
///    - macOS: `~/Library/Application Support/sensor-console`
pub fn state_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return PathBuf::from(xdg).join(APP_NAME);
    }
    platform_state_dir().join(APP_NAME)
}

/// Platform-native state base directory (without XDG override).
fn platform_state_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().expect("could not determine data directory")
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::home_dir()
            .expect("could not determine home directory")
            .join(".local/state")
    }
}

/// Returns the path of the preference store file.
///
/// Resolves to `state_dir()/prefs.json`.
pub fn prefs_path() -> PathBuf {
    state_dir().join("prefs.json")
}

/// Returns the default log file path.
///
/// Resolves to `state_dir()/scd.log`. The TUI owns the terminal, so logs
/// never go to stderr while the dashboard is running.
pub fn default_log_path() -> PathBuf {
    state_dir().join("scd.log")
}

/// Creates a directory and all parent directories with mode 0700.
///
/// Equivalent to `mkdir -p` with restricted permissions.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

/// Creates the configuration directory if it does not exist, returning its path.
pub fn ensure_config_dir() -> std::io::Result<PathBuf> {
    let dir = config_dir();
    ensure_dir(&dir)?;
    Ok(dir)
}
