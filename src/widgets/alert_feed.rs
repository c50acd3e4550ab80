//! Alert notification feed.
//!
//! Renders active alerts newest first, each as `HH:MM:SS - message` with
//! severity coloring. When nothing is active, shows a dim placeholder so
//! the panel never looks broken.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget as _, Wrap};
use ratatui::{buffer::Buffer, layout::Constraint, layout::Rect};

use crate::alerts::Severity;
use crate::widgets::{Widget, WidgetContext};

/// Scrolling list of recent alert notifications.
pub struct AlertFeedWidget;

impl AlertFeedWidget {
    /// Creates a new `AlertFeedWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AlertFeedWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for AlertFeedWidget {
    fn id(&self) -> &'static str {
        "alert-feed"
    }

    fn title(&self) -> &'static str {
        "Alerts"
    }

    fn constraint(&self) -> Constraint {
        Constraint::Length(6)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let theme = context.theme;
        if context.alerts.is_empty() {
            let placeholder = Paragraph::new(Line::styled(
                "No active alerts",
                Style::default().fg(theme.dim),
            ));
            placeholder.render(area, buf);
            return;
        }

        let lines: Vec<Line> = context
            .alerts
            .alerts()
            .iter()
            .map(|alert| {
                let color = match alert.severity {
                    Severity::Warning => theme.warning,
                    Severity::Danger => theme.danger,
                };
                Line::from(vec![
                    Span::styled(alert.timestamp.clone(), Style::default().fg(theme.dim)),
                    Span::raw(" - "),
                    Span::styled(alert.message.clone(), Style::default().fg(color)),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
