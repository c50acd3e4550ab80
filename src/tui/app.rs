//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, the simulator task, and
//! the core render loop. The layout engine inside `App` is the source of
//! truth for widget order; mouse and keyboard gestures both go through it.

use crate::alerts::{alert_for_reading, AlertFeed};
use crate::config::schema::{parse_duration_or, Config};
use crate::layout::{LayoutEngine, WidgetSlot};
use crate::sim::{run_simulator, History, SimMessage, SimParams};
use crate::store::{keys, PrefStore};
use crate::theme::{Theme, ThemeMode};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crate::widgets::{Widget, WidgetRegistry, DEFAULT_WIDGET_ORDER};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use ratatui::layout::{Position, Rect};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::collections::HashMap;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Passive refresh interval for simulator-driven redraws.
///
/// The gauge drifts once per second by default, so passive ticks render at
/// most once per second. User input events bypass this throttle and render
/// immediately.
const PASSIVE_REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// How long transient footer messages stay visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(2);

/// Core application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
    /// Loaded configuration.
    pub config: Config,
    /// File-backed preference store.
    pub store: PrefStore,
    /// Widget order and drag-session state.
    pub engine: LayoutEngine,
    /// Widget instances, looked up by identifier at render time.
    pub widgets: HashMap<String, Box<dyn Widget>>,
    /// Active color palette.
    pub theme: Theme,
    /// Historical sensor series generated at startup.
    pub history: History,
    /// Current live gauge temperature in °C.
    pub gauge_temp: f64,
    /// Active alert notifications.
    pub alerts: AlertFeed,
    /// Index of the selected widget in the container order, if any.
    pub selected_index: Option<usize>,
    /// Whether the map's device-info popup is open.
    pub map_popup_open: bool,
    /// Temporary status message shown in the footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    /// Rendered area of each widget in container order.
    ///
    /// Updated during each render pass. Used for mouse hit-testing and for
    /// the midpoints the drop-target computation works from. Empty until
    /// the first render.
    pub widget_areas: Vec<(String, Rect)>,
    /// Last time a passive (tick-driven) render occurred.
    last_passive_render: Instant,
}

impl App {
    /// Creates the app from loaded configuration and an opened store.
    ///
    /// Restores the persisted layout and dark-mode preference, generates
    /// the startup history, and centers the gauge in its drift bounds.
    pub fn new(config: Config, store: PrefStore) -> Self {
        let theme = Theme::from_mode(ThemeMode::from_pref(store.get(keys::DARK_MODE)));

        let mut engine = LayoutEngine::new(DEFAULT_WIDGET_ORDER.iter().copied());
        engine.restore_layout(&store);

        let registry = WidgetRegistry::new();
        let mut widgets: HashMap<String, Box<dyn Widget>> = HashMap::new();
        for id in DEFAULT_WIDGET_ORDER {
            if let Some(widget) = registry.create(id) {
                widgets.insert((*id).to_string(), widget);
            }
        }

        let mut rng = SmallRng::from_entropy();
        let history = History::generate(&mut rng);
        let sim = &config.simulator;
        let gauge_temp = (sim.gauge_min + sim.gauge_max) / 2.0;
        let alert_ttl = parse_duration_or(&sim.alert_ttl, Duration::from_secs(10));

        Self {
            should_quit: false,
            tick_count: 0,
            store,
            engine,
            widgets,
            theme,
            history,
            gauge_temp,
            alerts: AlertFeed::new(alert_ttl),
            selected_index: None,
            map_popup_open: false,
            status_message: None,
            widget_areas: Vec::new(),
            last_passive_render: Instant::now(),
            config,
        }
    }

    /// Identifier of the selected widget, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_index
            .and_then(|i| self.engine.order().get(i))
            .map(String::as_str)
    }

    /// Moves the selection down by one, clamped to the last widget.
    pub fn select_next(&mut self) {
        let len = self.engine.order().len();
        if len == 0 {
            return;
        }
        let new_idx = self.selected_index.map_or(0, |i| (i + 1).min(len - 1));
        self.set_selection(Some(new_idx));
    }

    /// Moves the selection up by one, clamped to index 0.
    pub fn select_previous(&mut self) {
        if self.engine.order().is_empty() {
            return;
        }
        let new_idx = self.selected_index.map_or(0, |i| i.saturating_sub(1));
        self.set_selection(Some(new_idx));
    }

    /// Updates the selection, closing the map popup when focus moves.
    fn set_selection(&mut self, index: Option<usize>) {
        if self.selected_index != index {
            self.map_popup_open = false;
        }
        self.selected_index = index;
    }

    /// Moves the selected widget one slot down and persists the layout.
    ///
    /// Keyboard parity with the pointer gesture: the move goes through the
    /// same `apply_drop` reordering the mouse path uses.
    pub fn move_selected_down(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        let order = self.engine.order();
        if idx + 1 >= order.len() {
            return;
        }
        let dragged = order[idx].clone();
        let target = match order.get(idx + 2) {
            Some(below) => crate::layout::DropTarget::Before(below.clone()),
            None => crate::layout::DropTarget::End,
        };
        self.engine.apply_drop(&dragged, &target);
        self.selected_index = Some(idx + 1);
        self.persist_layout();
    }

    /// Moves the selected widget one slot up and persists the layout.
    pub fn move_selected_up(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        if idx == 0 {
            return;
        }
        let order = self.engine.order();
        let dragged = order[idx].clone();
        let target = crate::layout::DropTarget::Before(order[idx - 1].clone());
        self.engine.apply_drop(&dragged, &target);
        self.selected_index = Some(idx - 1);
        self.persist_layout();
    }

    /// Persists the current widget order, surfacing failures in the footer.
    fn persist_layout(&mut self) {
        if let Err(e) = self.engine.persist_layout(&mut self.store) {
            tracing::warn!("failed to persist layout: {}", e);
            self.show_status(format!("Layout not saved: {}", e));
        }
    }

    /// Toggles dark mode and persists the preference immediately.
    pub fn toggle_dark_mode(&mut self) {
        self.theme = self.theme.toggled();
        self.store
            .set(keys::DARK_MODE, self.theme.mode.pref_value());
        if let Err(e) = self.store.save() {
            tracing::warn!("failed to persist dark mode: {}", e);
            self.show_status(format!("Preference not saved: {}", e));
        }
    }

    /// Toggles the map's device-info popup when the map widget is selected.
    pub fn toggle_map_popup(&mut self) {
        if self.selected_id() == Some("device-map") {
            self.map_popup_open = !self.map_popup_open;
        } else {
            self.show_status("Select the map widget to view device info".to_string());
        }
    }

    /// Logs out: removes the session preference, persists, and quits.
    pub fn logout(&mut self) {
        self.store.remove(keys::LOGGED_IN);
        if let Err(e) = self.store.save() {
            tracing::warn!("failed to persist logout: {}", e);
        }
        tracing::info!("logged out");
        self.should_quit = true;
    }

    /// Applies one simulator message to the app state.
    pub fn apply_sim_message(&mut self, msg: SimMessage) {
        match msg {
            SimMessage::Reading(reading) => {
                let sim = &self.config.simulator;
                if let Some(alert) =
                    alert_for_reading(reading, sim.warning_threshold, sim.danger_threshold)
                {
                    tracing::info!("{} alert: {}", alert.severity, alert.message);
                    self.alerts.push(alert);
                }
            }
            SimMessage::Gauge(temp) => {
                self.gauge_temp = temp;
            }
        }
    }

    /// Shows a transient message in the footer.
    fn show_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Finds the widget whose last-rendered area contains the position.
    fn widget_at(&self, column: u16, row: u16) -> Option<String> {
        self.widget_areas
            .iter()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
            .map(|(id, _)| id.clone())
    }

    /// Handles a mouse event.
    ///
    /// Left-button down on a widget selects it and begins a drag session;
    /// drag motion recomputes the drop target from row midpoints and applies
    /// the reorder live; button release ends the session and persists the
    /// final order. Scroll moves the selection.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.widget_at(mouse.column, mouse.row) {
                    Some(id) => {
                        let index = self.engine.order().iter().position(|w| *w == id);
                        self.set_selection(index);
                        self.engine.begin_drag(&id);
                    }
                    None => self.set_selection(None),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(dragged) = self.engine.dragging().map(str::to_string) else {
                    return;
                };
                let target = {
                    let slots: Vec<WidgetSlot> = self
                        .widget_areas
                        .iter()
                        .map(|(id, rect)| WidgetSlot {
                            id: id.as_str(),
                            midpoint_y: rect.y + rect.height / 2,
                        })
                        .collect();
                    self.engine.drop_target(mouse.row, &slots)
                };
                self.engine.apply_drop(&dragged, &target);
                // Keep the selection on the dragged widget.
                self.selected_index = self.engine.order().iter().position(|w| *w == dragged);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.engine.dragging().is_some() {
                    if let Err(e) = self.engine.end_drag(&mut self.store) {
                        tracing::warn!("failed to persist layout: {}", e);
                        self.show_status(format!("Layout not saved: {}", e));
                    } else {
                        self.show_status("Layout saved".to_string());
                    }
                }
            }
            MouseEventKind::ScrollDown => self.select_next(),
            MouseEventKind::ScrollUp => self.select_previous(),
            _ => {}
        }
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let tick_rate = parse_duration_or(&self.config.ui.tick_rate, Duration::from_millis(250));
        let event_handler = EventHandler::new(tick_rate);
        let mut reader = EventStream::new();

        // Opening the dashboard establishes the session.
        self.store.set(keys::LOGGED_IN, "true");
        if let Err(e) = self.store.save() {
            tracing::warn!("failed to persist login: {}", e);
        }

        // Spawn the sensor simulator feeding this loop.
        let sim = &self.config.simulator;
        let params = SimParams {
            alert_interval: parse_duration_or(&sim.alert_interval, Duration::from_secs(5)),
            gauge_interval: parse_duration_or(&sim.gauge_interval, Duration::from_secs(1)),
            gauge_min: sim.gauge_min,
            gauge_max: sim.gauge_max,
        };
        let (sim_tx, mut sim_rx) = mpsc::channel::<SimMessage>(64);
        tokio::spawn(run_simulator(params, sim_tx));

        loop {
            // Drain simulator updates before rendering
            while let Ok(msg) = sim_rx.try_recv() {
                self.apply_sim_message(msg);
            }

            let event = event_handler.next(&mut reader).await?;
            let should_render = match event {
                Event::Key(key) => {
                    match handle_key_event(self, key) {
                        Action::Quit => return Ok(()),
                        Action::ToggleDarkMode => self.toggle_dark_mode(),
                        Action::MoveSelectedDown => self.move_selected_down(),
                        Action::MoveSelectedUp => self.move_selected_up(),
                        Action::ToggleInfo => self.toggle_map_popup(),
                        Action::Logout => self.logout(),
                        Action::Defocus => self.set_selection(None),
                        Action::None => {}
                    }
                    if self.should_quit {
                        return Ok(());
                    }
                    true // Input events always render immediately
                }
                Event::Mouse(mouse) => {
                    self.handle_mouse_event(mouse);
                    true
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.alerts.expire(Instant::now());
                    self.expire_status_message();
                    // Passive tick: only render if the interval has elapsed
                    self.last_passive_render.elapsed() >= PASSIVE_REFRESH_INTERVAL
                }
                Event::Resize(_, _) => true,
            };

            if should_render {
                terminal.draw(|frame| {
                    render_dashboard(frame, self);
                })?;
                self.last_passive_render = Instant::now();
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
