//! TUI module for the Sensor Console Dashboard.
//!
//! Provides a terminal user interface built on ratatui and crossterm,
//! showing simulated sensor data in a stack of drag-reorderable widgets.

pub mod app;
pub mod event;
pub mod ui;
