//! Live temperature gauge.
//!
//! Shows the current simulated temperature as a horizontal fill bar with
//! a numeric label. The fill ratio is the temperature over the configured
//! full-scale value, clamped to the displayable range.

use ratatui::style::Style;
use ratatui::widgets::{Gauge, Widget as _};
use ratatui::{buffer::Buffer, layout::Constraint, layout::Rect};

use crate::widgets::{Widget, WidgetContext};

/// Horizontal gauge tracking the live temperature.
pub struct TemperatureGaugeWidget;

impl TemperatureGaugeWidget {
    /// Creates a new `TemperatureGaugeWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemperatureGaugeWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TemperatureGaugeWidget {
    fn id(&self) -> &'static str {
        "temperature-gauge"
    }

    fn title(&self) -> &'static str {
        "Live Temperature"
    }

    fn constraint(&self) -> Constraint {
        Constraint::Length(3)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(context.theme.gauge))
            .ratio(fill_ratio(context.gauge_temp, context.gauge_scale))
            .label(format!("{:.1}°C", context.gauge_temp));
        gauge.render(area, buf);
    }
}

/// Computes the gauge fill ratio, clamped to [0, 1].
///
/// A non-positive scale would divide to infinity; treat it as an empty
/// gauge instead.
fn fill_ratio(temp: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return 0.0;
    }
    (temp / scale).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_support::{buffer_text, ContextFixture};

    #[test]
    fn widget_identity() {
        let w = TemperatureGaugeWidget::new();
        assert_eq!(w.id(), "temperature-gauge");
        assert_eq!(w.title(), "Live Temperature");
    }

    #[test]
    fn fill_ratio_scales_and_clamps() {
        assert!((fill_ratio(25.0, 50.0) - 0.5).abs() < f64::EPSILON);
        assert_eq!(fill_ratio(75.0, 50.0), 1.0);
        assert_eq!(fill_ratio(-3.0, 50.0), 0.0);
    }

    #[test]
    fn fill_ratio_zero_scale_is_empty() {
        assert_eq!(fill_ratio(27.0, 0.0), 0.0);
        assert_eq!(fill_ratio(27.0, -1.0), 0.0);
    }

    #[test]
    fn render_shows_temperature_label() {
        let mut fixture = ContextFixture::new();
        fixture.gauge_temp = 27.3;
        let ctx = fixture.context();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        TemperatureGaugeWidget::new().render(area, &mut buf, &ctx);
        let text = buffer_text(&buf);
        assert!(text.contains("27.3°C"), "missing label:\n{text}");
    }
}
