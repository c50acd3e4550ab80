//! Sensor simulator feeding the TUI.
//!
//! A spawned tokio task stands in for real sensor ingestion: it draws
//! random temperature readings on the alert interval and drifts the live
//! gauge value on the gauge interval, delivering both to the event loop
//! over an mpsc channel. The task exits when the receiver is dropped.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;

/// Messages produced by the simulator task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimMessage {
    /// A raw temperature reading in 0..100, to be classified for alerts.
    Reading(u8),
    /// Updated live gauge temperature.
    Gauge(f64),
}

/// Timing and bounds for the simulator task.
#[derive(Debug, Clone, Copy)]
pub struct SimParams {
    /// Interval between alert-check readings.
    pub alert_interval: Duration,
    /// Interval between gauge drift steps.
    pub gauge_interval: Duration,
    /// Lower clamp for the gauge temperature.
    pub gauge_min: f64,
    /// Upper clamp for the gauge temperature.
    pub gauge_max: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            alert_interval: Duration::from_secs(5),
            gauge_interval: Duration::from_secs(1),
            gauge_min: 26.0,
            gauge_max: 28.0,
        }
    }
}

/// Applies one drift step to the gauge temperature.
///
/// The result is clamped to the configured bounds so the gauge never walks
/// off its scale.
pub fn drift(current: f64, fluctuation: f64, min: f64, max: f64) -> f64 {
    (current + fluctuation).clamp(min, max)
}

/// Runs the simulator until the receiver side of `tx` is dropped.
///
/// The gauge starts at the midpoint of its bounds. Each gauge step adds a
/// uniform fluctuation in [-0.25, 0.25]; each alert step draws a uniform
/// reading in 0..100.
pub async fn run_simulator(params: SimParams, tx: mpsc::Sender<SimMessage>) {
    let mut rng = SmallRng::from_entropy();
    let mut current_temp = (params.gauge_min + params.gauge_max) / 2.0;

    let mut alert_tick = tokio::time::interval(params.alert_interval);
    let mut gauge_tick = tokio::time::interval(params.gauge_interval);
    // Both intervals fire immediately on first tick; consume those so the
    // dashboard starts quiet.
    alert_tick.tick().await;
    gauge_tick.tick().await;

    loop {
        tokio::select! {
            _ = alert_tick.tick() => {
                let reading: u8 = rng.gen_range(0..100);
                if tx.send(SimMessage::Reading(reading)).await.is_err() {
                    break;
                }
            }
            _ = gauge_tick.tick() => {
                let fluctuation = (rng.gen::<f64>() - 0.5) * 0.5;
                current_temp = drift(
                    current_temp,
                    fluctuation,
                    params.gauge_min,
                    params.gauge_max,
                );
                if tx.send(SimMessage::Gauge(current_temp)).await.is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("simulator task exiting, receiver dropped");
}

/// Historical sensor series generated once at startup.
///
/// Twelve samples at five-minute spacing, oldest first, mirroring what a
/// real ingestion pipeline would have accumulated before the dashboard
/// opened.
#[derive(Debug, Clone)]
pub struct History {
    /// Human-readable sample labels, oldest first ("55 mins ago" .. "now").
    pub labels: Vec<String>,
    /// Temperature series in °C, oldest first.
    pub temperature: Vec<f64>,
    /// Relative humidity series in %, oldest first.
    pub humidity: Vec<f64>,
}

/// Number of historical samples generated at startup.
pub const HISTORY_POINTS: usize = 12;

/// Minutes between historical samples.
pub const HISTORY_STEP_MINS: usize = 5;

impl History {
    /// Generates a synthetic history: temperature in 20..35 and humidity
    /// in 40..70, oldest sample first.
    pub fn generate(rng: &mut impl Rng) -> Self {
        let mut labels = Vec::with_capacity(HISTORY_POINTS);
        let mut temperature = Vec::with_capacity(HISTORY_POINTS);
        let mut humidity = Vec::with_capacity(HISTORY_POINTS);
        for i in (0..HISTORY_POINTS).rev() {
            let mins = i * HISTORY_STEP_MINS;
            labels.push(if mins == 0 {
                "now".to_string()
            } else {
                format!("{} mins ago", mins)
            });
            temperature.push((20.0 + rng.gen::<f64>() * 15.0).floor());
            humidity.push((40.0 + rng.gen::<f64>() * 30.0).floor());
        }
        Self {
            labels,
            temperature,
            humidity,
        }
    }
}
