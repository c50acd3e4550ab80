//! World map with the monitored device's location.
//!
//! Draws a braille world map with a marker at the device coordinate.
//! Selecting the widget and pressing `i` opens a centered popup with the
//! device's name, location, status, and coordinate.

use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget as _};
use ratatui::{buffer::Buffer, layout::Constraint, layout::Rect};

use crate::widgets::{Widget, WidgetContext};

/// Map widget showing where the monitored device sits.
pub struct DeviceMapWidget;

impl DeviceMapWidget {
    /// Creates a new `DeviceMapWidget`.
    pub fn new() -> Self {
        Self
    }
}

impl Default for DeviceMapWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for DeviceMapWidget {
    fn id(&self) -> &'static str {
        "device-map"
    }

    fn title(&self) -> &'static str {
        "Device Location"
    }

    fn constraint(&self) -> Constraint {
        Constraint::Min(8)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, context: &WidgetContext) {
        let device = context.device;
        let theme = context.theme;
        let canvas = Canvas::default()
            .x_bounds([-180.0, 180.0])
            .y_bounds([-90.0, 90.0])
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: theme.map,
                    resolution: MapResolution::High,
                });
                ctx.print(
                    device.longitude,
                    device.latitude,
                    Line::styled("◉", Style::default().fg(theme.danger)),
                );
            });
        canvas.render(area, buf);

        if context.map_popup_open {
            render_info_popup(area, buf, context);
        }
    }
}

/// Draws the device-info popup centered within the map area.
fn render_info_popup(area: Rect, buf: &mut Buffer, context: &WidgetContext) {
    let popup = centered_rect(area, 36, 6);
    if popup.width < 4 || popup.height < 4 {
        return;
    }
    let device = context.device;
    let theme = context.theme;

    Clear.render(popup, buf);
    let lines = vec![
        Line::raw(format!("Location: {}", device.location)),
        Line::raw(format!("Status: {}", device.status)),
        Line::raw(format!(
            "Position: {:.4}, {:.4}",
            device.latitude, device.longitude
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(device.name.clone()),
        );
    paragraph.render(popup, buf);
}

/// Computes a rect of at most `width` x `height` centered in `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
