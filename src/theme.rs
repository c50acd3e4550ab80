//! Color palettes for the dashboard.
//!
//! Two built-in palettes are provided: light (terminal default background)
//! and dark. The active palette follows the `darkMode` preference and can be
//! toggled at runtime with the `d` key.

use ratatui::style::Color;

/// Palette variants selectable by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    /// Terminal-default background with dark accents.
    Light,
    /// Dark background with bright accents.
    Dark,
}

impl ThemeMode {
    /// Parses the stored `darkMode` preference value.
    ///
    /// `"enabled"` selects dark mode; any other value (including an absent
    /// key surfaced as `None`) selects light mode.
    pub fn from_pref(value: Option<&str>) -> Self {
        match value {
            Some("enabled") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    /// Returns the preference value persisted for this mode.
    pub fn pref_value(self) -> &'static str {
        match self {
            ThemeMode::Dark => "enabled",
            ThemeMode::Light => "disabled",
        }
    }
}

/// Resolved color palette applied to every widget during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Active mode this palette was derived from.
    pub mode: ThemeMode,
    /// Screen background.
    pub bg: Color,
    /// Default foreground text.
    pub fg: Color,
    /// Subdued text (hints, placeholders).
    pub dim: Color,
    /// Unfocused widget borders.
    pub border: Color,
    /// Border of the focused widget.
    pub border_focus: Color,
    /// Border of the widget being dragged.
    pub border_drag: Color,
    /// Header title accent.
    pub accent: Color,
    /// Warning-severity alerts.
    pub warning: Color,
    /// Danger-severity alerts and the temperature series.
    pub danger: Color,
    /// Humidity series.
    pub humidity: Color,
    /// Gauge fill.
    pub gauge: Color,
    /// Map landmass.
    pub map: Color,
}

impl Theme {
    /// Light palette: keeps the terminal's own background.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg: Color::Reset,
            fg: Color::Reset,
            dim: Color::DarkGray,
            border: Color::DarkGray,
            border_focus: Color::Cyan,
            border_drag: Color::Yellow,
            accent: Color::Cyan,
            warning: Color::Yellow,
            danger: Color::Red,
            humidity: Color::Blue,
            gauge: Color::Red,
            map: Color::Green,
        }
    }

    /// Dark palette.
    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg: Color::Black,
            fg: Color::Gray,
            dim: Color::DarkGray,
            border: Color::DarkGray,
            border_focus: Color::LightCyan,
            border_drag: Color::LightYellow,
            accent: Color::LightCyan,
            warning: Color::LightYellow,
            danger: Color::LightRed,
            humidity: Color::LightBlue,
            gauge: Color::LightRed,
            map: Color::LightGreen,
        }
    }

    /// Returns the palette for `mode`.
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Returns the opposite palette.
    pub fn toggled(&self) -> Self {
        match self.mode {
            ThemeMode::Light => Self::dark(),
            ThemeMode::Dark => Self::light(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_from_pref_enabled_is_dark() {
        assert_eq!(ThemeMode::from_pref(Some("enabled")), ThemeMode::Dark);
    }

    #[test]
    fn mode_from_pref_disabled_is_light() {
        assert_eq!(ThemeMode::from_pref(Some("disabled")), ThemeMode::Light);
    }

    #[test]
    fn mode_from_pref_absent_is_light() {
        assert_eq!(ThemeMode::from_pref(None), ThemeMode::Light);
    }

    #[test]
    fn mode_from_pref_garbage_is_light() {
        assert_eq!(ThemeMode::from_pref(Some("yes please")), ThemeMode::Light);
    }

    #[test]
    fn pref_value_round_trips() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(ThemeMode::from_pref(Some(mode.pref_value())), mode);
        }
    }

    #[test]
    fn toggled_flips_mode_both_ways() {
        let light = Theme::light();
        assert_eq!(light.toggled().mode, ThemeMode::Dark);
        assert_eq!(light.toggled().toggled().mode, ThemeMode::Light);
    }

    #[test]
    fn from_mode_matches_constructors() {
        assert_eq!(Theme::from_mode(ThemeMode::Light), Theme::light());
        assert_eq!(Theme::from_mode(ThemeMode::Dark), Theme::dark());
    }
}
