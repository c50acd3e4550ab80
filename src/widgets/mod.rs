//! Widget system for the sensor console dashboard.
//!
//! This module defines the `Widget` trait that all dashboard widgets
//! implement, and the `WidgetRegistry` for creating widgets by identifier.
//!
//! # Architecture
//!
//! Widgets are self-contained panels stacked vertically in the dashboard.
//! Each widget receives a `WidgetContext` containing shared application
//! state and renders itself into the inner area of its bordered block.
//! The surrounding block (border, title, drag highlight) is drawn by the
//! UI layer, which also records each widget's rendered area for mouse
//! hit-testing.
//!
//! The `WidgetRegistry` maps widget identifiers to factory functions.
//! The layout engine orders widgets purely by identifier; the registry is
//! the single place identifiers meet implementations.

pub mod alert_feed;
pub mod device_map;
pub mod gauge;
pub mod history_chart;

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use std::collections::HashMap;

use crate::alerts::AlertFeed;
use crate::config::schema::DeviceConfig;
use crate::sim::History;
use crate::theme::Theme;

/// Default top-to-bottom widget order on first launch, before any
/// persisted layout record exists.
pub const DEFAULT_WIDGET_ORDER: &[&str] = &[
    "history-chart",
    "temperature-gauge",
    "device-map",
    "alert-feed",
];

/// Shared application state handed to every widget at render time.
///
/// Borrowed from the event loop's `App`; widgets never mutate state.
pub struct WidgetContext<'a> {
    /// Active color palette.
    pub theme: &'a Theme,
    /// Historical sensor series for the chart.
    pub history: &'a History,
    /// Current live gauge temperature in °C.
    pub gauge_temp: f64,
    /// Full-scale value the gauge fill ratio is computed against.
    pub gauge_scale: f64,
    /// Monitored device identity and coordinate.
    pub device: &'a DeviceConfig,
    /// Active alert notifications, newest first.
    pub alerts: &'a AlertFeed,
    /// Whether the map's device-info popup is open.
    pub map_popup_open: bool,
}

/// Trait for dashboard widgets.
///
/// Each widget renders into the inner [`Rect`] of its block given shared
/// context. Widgets must be `Send + Sync` so trait objects can be held
/// across await points in the event loop.
pub trait Widget: Send + Sync {
    /// Unique identifier for this widget type.
    ///
    /// This is the string that appears in the persisted layout record.
    fn id(&self) -> &'static str;

    /// Title shown in the widget's block border.
    fn title(&self) -> &'static str;

    /// Vertical space request within the dashboard stack.
    fn constraint(&self) -> Constraint;

    /// Render the widget content into `area` of `buf`.
    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext);
}

/// Factory function type for creating widget instances.
pub type WidgetFactory = fn() -> Box<dyn Widget>;

/// Registry mapping widget identifiers to factory functions.
pub struct WidgetRegistry {
    factories: HashMap<&'static str, WidgetFactory>,
}

impl WidgetRegistry {
    /// Creates a registry with all built-in widgets registered.
    ///
    /// The registered identifiers are exactly [`DEFAULT_WIDGET_ORDER`]:
    /// `history-chart`, `temperature-gauge`, `device-map`, `alert-feed`.
    pub fn new() -> Self {
        let mut reg = Self {
            factories: HashMap::new(),
        };
        reg.register("history-chart", || {
            Box::new(history_chart::HistoryChartWidget::new())
        });
        reg.register("temperature-gauge", || {
            Box::new(gauge::TemperatureGaugeWidget::new())
        });
        reg.register("device-map", || Box::new(device_map::DeviceMapWidget::new()));
        reg.register("alert-feed", || Box::new(alert_feed::AlertFeedWidget::new()));
        reg
    }

    /// Register a widget factory for the given identifier.
    ///
    /// Overwrites any existing factory for the same ID.
    pub fn register(&mut self, id: &'static str, factory: WidgetFactory) {
        self.factories.insert(id, factory);
    }

    /// Create a widget instance by identifier.
    ///
    /// Returns `None` if no factory is registered for the given ID.
    pub fn create(&self, id: &str) -> Option<Box<dyn Widget>> {
        self.factories.get(id).map(|f| f())
    }

    /// List all registered widget identifiers. Order is not guaranteed.
    pub fn available_ids(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
