//! Sensor Console Dashboard library
//!
//! This crate provides a terminal dashboard for monitoring a simulated
//! IoT sensor: an alert feed, a historical dual-series chart, a live
//! temperature gauge, and a device location map, stacked as widgets that
//! can be reordered by dragging with the mouse.
//!
//! The widget order is owned by the [`layout::LayoutEngine`] and survives
//! restarts through the file-backed [`store::PrefStore`], alongside the
//! dark-mode and session preferences.
//!
//! # Platform Support
//!
//! Unix-like systems only (Linux, macOS): path resolution follows the XDG
//! Base Directory Specification with Apple conventions on macOS.

/// Severity-classified sensor alerts with auto-expiry.
pub mod alerts;

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Drag-and-drop widget reordering and layout persistence.
pub mod layout;

/// File-based logging setup (the TUI owns the terminal).
pub mod logging;

/// Simulated sensor ingestion and startup history.
pub mod sim;

/// File-backed preference store.
pub mod store;

/// Light and dark color palettes.
pub mod theme;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Widget system for composable dashboard UI components.
pub mod widgets;
