//! Severity-classified sensor alerts with auto-expiry.
//!
//! The simulator produces raw temperature readings; this module classifies
//! them against configurable thresholds, formats the notification message,
//! and keeps the transient feed pruned. Expiry is checked on the render
//! tick with a fixed time-to-live, not with cancellable timers.

use std::fmt;
use std::time::{Duration, Instant};

/// Alert severity tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Elevated reading worth attention.
    Warning,
    /// Reading above the danger threshold.
    Danger,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        };
        write!(f, "{}", s)
    }
}

/// A transient notification shown in the alert feed.
#[derive(Debug, Clone)]
pub struct Alert {
    /// Severity tag controlling the visual treatment.
    pub severity: Severity,
    /// Formatted message body.
    pub message: String,
    /// Wall-clock time the alert was raised, pre-formatted for display.
    pub timestamp: String,
    /// Monotonic creation time, used for expiry.
    pub raised_at: Instant,
}

impl Alert {
    /// Creates an alert raised now.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            raised_at: Instant::now(),
        }
    }
}

/// Classifies a temperature reading against the alert thresholds.
///
/// Readings above `danger` are danger alerts; readings above `warning` (but
/// not above `danger`) are warnings; everything else raises no alert.
pub fn classify(reading: u8, warning: u8, danger: u8) -> Option<Severity> {
    if reading > danger {
        Some(Severity::Danger)
    } else if reading > warning {
        Some(Severity::Warning)
    } else {
        None
    }
}

/// Builds the alert for a temperature reading, if one is warranted.
pub fn alert_for_reading(reading: u8, warning: u8, danger: u8) -> Option<Alert> {
    let severity = classify(reading, warning, danger)?;
    let message = match severity {
        Severity::Danger => format!("High Temperature Alert! Current temp: {}°C", reading),
        Severity::Warning => format!("Temperature Warning. Current temp: {}°C", reading),
    };
    Some(Alert::new(severity, message))
}

/// Transient notification list, newest first.
#[derive(Debug)]
pub struct AlertFeed {
    alerts: Vec<Alert>,
    ttl: Duration,
}

impl AlertFeed {
    /// Creates an empty feed whose alerts expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            alerts: Vec::new(),
            ttl,
        }
    }

    /// Prepends an alert so the newest renders first.
    pub fn push(&mut self, alert: Alert) {
        self.alerts.insert(0, alert);
    }

    /// Drops alerts older than the feed's time-to-live.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.alerts
            .retain(|a| now.duration_since(a.raised_at) < ttl);
    }

    /// Active alerts, newest first.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Returns `true` if no alerts are active.
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }
}
