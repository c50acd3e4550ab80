//! Historical sensor data chart.
//!
//! Plots the startup history as two line series, temperature in °C and
//! relative humidity in %, over the last hour of five-minute samples.
//! Both series share one y axis scaled 0..100.

use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Widget as _};
use ratatui::{buffer::Buffer, layout::Constraint, layout::Rect};

use crate::widgets::{Widget, WidgetContext};

/// Dual-series line chart of recent sensor history.
pub struct HistoryChartWidget;

impl HistoryChartWidget {
    /// Creates a new `HistoryChartWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for HistoryChartWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for HistoryChartWidget {
    fn id(&self) -> &'static str {
        "history-chart"
    }

    fn title(&self) -> &'static str {
        "Sensor History"
    }

    fn constraint(&self) -> Constraint {
        Constraint::Min(8)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let history = context.history;
        let temperature = series_points(&history.temperature);
        let humidity = series_points(&history.humidity);

        let datasets = vec![
            Dataset::default()
                .name("Temperature (°C)")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(context.theme.danger))
                .data(&temperature),
            Dataset::default()
                .name("Humidity (%)")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(context.theme.humidity))
                .data(&humidity),
        ];

        let x_max = history.labels.len().saturating_sub(1) as f64;
        let x_labels: Vec<Line> = match (history.labels.first(), history.labels.last()) {
            (Some(first), Some(last)) => vec![
                Line::raw(first.clone()),
                Line::raw(last.clone()),
            ],
            _ => Vec::new(),
        };

        let chart = Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(context.theme.dim))
                    .bounds([0.0, x_max])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(context.theme.dim))
                    .bounds([0.0, 100.0])
                    .labels(["0", "50", "100"]),
            );

        chart.render(area, buf);
    }
}

/// Converts a sample series to chart points indexed by sample position.
fn series_points(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::{buffer_text, ContextFixture};

    #[test]
    fn widget_identity() {
        let w = HistoryChartWidget::new();
        assert_eq!(w.id(), "history-chart");
        assert_eq!(w.title(), "Sensor History");
    }

    #[test]
    fn series_points_index_samples() {
        let points = series_points(&[25.0, 30.0, 28.0]);
        assert_eq!(points, vec![(0.0, 25.0), (1.0, 30.0), (2.0, 28.0)]);
    }

    #[test]
    fn series_points_empty_input() {
        assert!(series_points(&[]).is_empty());
    }

    #[test]
    fn render_shows_axis_labels() {
        let fixture = ContextFixture::new();
        let ctx = fixture.context();
        let area = Rect::new(0, 0, 70, 14);
        let mut buf = Buffer::empty(area);
        HistoryChartWidget::new().render(area, &mut buf, &ctx);
        let text = buffer_text(&buf);
        assert!(text.contains("55 mins ago"), "missing oldest label:\n{text}");
        assert!(text.contains("now"), "missing newest label:\n{text}");
        assert!(text.contains("100"), "missing y axis label:\n{text}");
    }

    #[test]
    fn render_into_narrow_area_does_not_panic() {
        let fixture = ContextFixture::new();
        let ctx = fixture.context();
        let area = Rect::new(0, 0, 5, 2);
        let mut buf = Buffer::empty(area);
        HistoryChartWidget::new().render(area, &mut buf, &ctx);
    }
}
