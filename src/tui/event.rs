//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.

use crate::tui::app::App;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers, MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button or motion event.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Toggle the dark-mode theme and persist the preference.
    ToggleDarkMode,
    /// Move the selected widget one slot down and persist the layout.
    MoveSelectedDown,
    /// Move the selected widget one slot up and persist the layout.
    MoveSelectedUp,
    /// Toggle the map's device-info popup.
    ToggleInfo,
    /// Log out: clear the session preference, persist, and exit.
    Logout,
    /// Clear the widget selection.
    Defocus,
}

/// Handles a key event by dispatching to the appropriate app method or action.
///
/// Selection movement mutates the app directly; everything that touches the
/// preference store or the layout engine is returned as an [`Action`] for
/// the event loop to apply.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_previous();
            Action::None
        }
        KeyCode::Char('J') => Action::MoveSelectedDown,
        KeyCode::Char('K') => Action::MoveSelectedUp,
        KeyCode::Char('d') => Action::ToggleDarkMode,
        KeyCode::Char('i') | KeyCode::Enter => Action::ToggleInfo,
        KeyCode::Char('L') => Action::Logout,
        KeyCode::Esc => Action::Defocus,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::test_support::make_app;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_event_handler_creation() {
        let handler = EventHandler::new(Duration::from_millis(250));
        assert_eq!(handler.tick_rate, Duration::from_millis(250));
    }

    #[test]
    fn test_event_debug_format() {
        let event = Event::Tick;
        let debug = format!("{:?}", event);
        assert!(debug.contains("Tick"));
    }

    #[test]
    fn test_event_resize_variant() {
        let event = Event::Resize(80, 24);
        match event {
            Event::Resize(w, h) => {
                assert_eq!(w, 80);
                assert_eq!(h, 24);
            }
            _ => panic!("expected Resize variant"),
        }
    }

    #[test]
    fn test_handle_key_q_quits() {
        let (_dir, mut app) = make_app();
        let action = handle_key_event(&mut app, make_key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(action, Action::Quit);
    }

    #[test]
    fn test_handle_key_ctrl_c_quits() {
        let (_dir, mut app) = make_app();
        let action =
            handle_key_event(&mut app, make_key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(action, Action::Quit);
    }

    #[test]
    fn test_handle_key_j_selects_next() {
        let (_dir, mut app) = make_app();
        assert_eq!(app.selected_index, None);
        let action = handle_key_event(&mut app, make_key(KeyCode::Char('j'), KeyModifiers::NONE));
        assert_eq!(action, Action::None);
        assert_eq!(app.selected_index, Some(0));
        handle_key_event(&mut app, make_key(KeyCode::Down, KeyModifiers::NONE));
        assert_eq!(app.selected_index, Some(1));
    }

    #[test]
    fn test_handle_key_k_selects_previous() {
        let (_dir, mut app) = make_app();
        app.selected_index = Some(2);
        let action = handle_key_event(&mut app, make_key(KeyCode::Char('k'), KeyModifiers::NONE));
        assert_eq!(action, Action::None);
        assert_eq!(app.selected_index, Some(1));
    }

    #[test]
    fn test_handle_key_selection_clamps_at_ends() {
        let (_dir, mut app) = make_app();
        let last = app.engine.order().len() - 1;
        app.selected_index = Some(last);
        handle_key_event(&mut app, make_key(KeyCode::Char('j'), KeyModifiers::NONE));
        assert_eq!(app.selected_index, Some(last));
        app.selected_index = Some(0);
        handle_key_event(&mut app, make_key(KeyCode::Char('k'), KeyModifiers::NONE));
        assert_eq!(app.selected_index, Some(0));
    }

    #[test]
    fn test_handle_shift_j_k_move_widget() {
        let (_dir, mut app) = make_app();
        assert_eq!(
            handle_key_event(&mut app, make_key(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Action::MoveSelectedDown
        );
        assert_eq!(
            handle_key_event(&mut app, make_key(KeyCode::Char('K'), KeyModifiers::SHIFT)),
            Action::MoveSelectedUp
        );
    }

    #[test]
    fn test_handle_key_d_toggles_dark_mode() {
        let (_dir, mut app) = make_app();
        let action = handle_key_event(&mut app, make_key(KeyCode::Char('d'), KeyModifiers::NONE));
        assert_eq!(action, Action::ToggleDarkMode);
    }

    #[test]
    fn test_handle_key_i_and_enter_toggle_info() {
        let (_dir, mut app) = make_app();
        assert_eq!(
            handle_key_event(&mut app, make_key(KeyCode::Char('i'), KeyModifiers::NONE)),
            Action::ToggleInfo
        );
        assert_eq!(
            handle_key_event(&mut app, make_key(KeyCode::Enter, KeyModifiers::NONE)),
            Action::ToggleInfo
        );
    }

    #[test]
    fn test_handle_key_shift_l_logs_out() {
        let (_dir, mut app) = make_app();
        let action = handle_key_event(&mut app, make_key(KeyCode::Char('L'), KeyModifiers::SHIFT));
        assert_eq!(action, Action::Logout);
    }

    #[test]
    fn test_handle_esc_defocuses() {
        let (_dir, mut app) = make_app();
        let action = handle_key_event(&mut app, make_key(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(action, Action::Defocus);
    }

    #[test]
    fn test_handle_key_unknown_returns_none() {
        let (_dir, mut app) = make_app();
        let noop_keys = [KeyCode::Char('a'), KeyCode::Char('z'), KeyCode::Tab];
        for code in noop_keys {
            let action = handle_key_event(&mut app, make_key(code, KeyModifiers::NONE));
            assert_eq!(action, Action::None, "expected None for {:?}", code);
        }
    }
}
