//! Main rendering orchestration for the TUI dashboard.
//!
//! Provides the top-level `render_dashboard` function that composes the
//! header, the widget stack in container order, and the footer. Each
//! widget's rendered area is recorded back into the app for mouse
//! hit-testing and drop-target midpoints.

use crate::tui::app::App;
use crate::widgets::WidgetContext;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "Sensor Console Dashboard";

/// Footer text showing available keybindings.
const FOOTER_TEXT: &str =
    "[j/k] Select  [J/K] Move  [drag] Reorder  [d] Dark mode  [i] Info  [L] Logout  [q] Quit";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Renders the full dashboard: header, widget stack, footer.
///
/// Widgets render top to bottom in the layout engine's container order.
/// The selected widget gets a highlighted border; the dragged widget gets
/// the drag border color. Updates `app.widget_areas` with each widget's
/// rendered Rect for mouse hit-testing.
pub fn render_dashboard(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let theme = app.theme;

    // Paint the palette background over the whole screen first.
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // widget stack
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_widget_stack(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

/// Renders the header line: title (left) and version (right-aligned).
fn render_header(frame: &mut Frame, app: &App, area: ratatui::prelude::Rect) {
    let theme = &app.theme;
    let header_width = area.width as usize;
    let available_space = header_width.saturating_sub(HEADER_TEXT.len());
    let padding_len = available_space.saturating_sub(VERSION_TEXT.len());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(HEADER_TEXT, Style::default().fg(theme.accent)),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(VERSION_TEXT, Style::default().fg(theme.dim)),
    ]));
    frame.render_widget(header, area);
}

/// Renders the widget stack in container order, recording each widget's
/// area back into the app.
fn render_widget_stack(frame: &mut Frame, app: &mut App, area: ratatui::prelude::Rect) {
    let order: Vec<String> = app.engine.order().to_vec();
    let constraints: Vec<Constraint> = order
        .iter()
        .map(|id| {
            app.widgets
                .get(id)
                .map_or(Constraint::Length(3), |w| w.constraint())
        })
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let selected_id = app.selected_id().map(str::to_string);

    let context = WidgetContext {
        theme: &app.theme,
        history: &app.history,
        gauge_temp: app.gauge_temp,
        gauge_scale: app.config.simulator.gauge_scale,
        device: &app.config.device,
        alerts: &app.alerts,
        map_popup_open: app.map_popup_open,
    };

    let mut areas = Vec::with_capacity(order.len());
    for (id, chunk) in order.iter().zip(chunks.iter()) {
        let Some(widget) = app.widgets.get(id) else {
            continue;
        };

        let border_color = if app.engine.is_dragging(id) {
            app.theme.border_drag
        } else if selected_id.as_deref() == Some(id.as_str()) {
            app.theme.border_focus
        } else {
            app.theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(widget.title());
        let inner = block.inner(*chunk);
        frame.render_widget(block, *chunk);

        widget.render(inner, frame.buffer_mut(), &context);
        areas.push((id.clone(), *chunk));
    }
    app.widget_areas = areas;
}

/// Renders the footer: a transient status message when active, otherwise
/// the keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: ratatui::prelude::Rect) {
    let theme = &app.theme;
    let line = match &app.status_message {
        Some((msg, expiry)) if Instant::now() < *expiry => Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(theme.warning),
        )),
        _ => Line::from(Span::styled(FOOTER_TEXT, Style::default().fg(theme.dim))),
    };
    frame.render_widget(Paragraph::new(line), area);
}
