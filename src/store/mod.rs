//! File-backed preference store.
//!
//! A flat string key-value map persisted as JSON in the user's state
//! directory. This is the dashboard's only durable state: the dark-mode
//! flag, the session flag, and the serialized widget layout all live here.
//!
//! Semantics are deliberately minimal: last-write-wins, no schema
//! versioning, absent key = default state. A missing or unreadable file is
//! treated as an empty store so the dashboard always starts, never crashes
//! on bad state.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Well-known preference keys.
pub mod keys {
    /// Dark-mode flag: `"enabled"` or `"disabled"`.
    pub const DARK_MODE: &str = "darkMode";
    /// Session flag: presence means a session is active.
    pub const LOGGED_IN: &str = "loggedIn";
    /// JSON-encoded ordered list of widget identifiers.
    pub const DASHBOARD_LAYOUT: &str = "dashboardLayout";
}

/// Errors that can occur when persisting preferences.
///
/// Reads never fail: unreadable or malformed content degrades to an empty
/// store, which is the documented recovery path.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to write the preference file to disk.
    #[error("Failed to write preference file: {path}")]
    WriteError {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to encode the preference map as JSON.
    #[error("Failed to encode preferences: {message}")]
    EncodeError {
        /// Description of the serialization failure.
        message: String,
    },
}

/// A file-backed string key-value store with last-write-wins semantics.
///
/// Keys are held in a `BTreeMap` so the serialized form is deterministic:
/// saving the same logical state twice produces byte-identical files.
#[derive(Debug)]
pub struct PrefStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl PrefStore {
    /// Opens the store at `path`, loading existing values if present.
    ///
    /// A missing file, unreadable file, or malformed JSON all yield an
    /// empty store; malformed content is logged and otherwise ignored.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<BTreeMap<String, String>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!(
                        "malformed preference file {}, starting empty: {}",
                        path.display(),
                        e
                    );
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(
                    "could not read preference file {}, starting empty: {}",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes `key`, returning the previous value if one existed.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the current map to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::WriteError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let content = serde_json::to_string_pretty(&self.values).map_err(|e| {
            StoreError::EncodeError {
                message: e.to_string(),
            }
        })?;
        fs::write(&self.path, content).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })
    }
}
