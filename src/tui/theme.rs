use ratatui::style::Color;

use crate::model::prefs::ThemeMode;
use crate::model::task::Priority;

/// Resolved color palette for the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub selection_bg: Color,
    pub warning_fg: Color,
    pub warning_bg: Color,
    pub progress_fill: Color,
    pub progress_track: Color,
    pub high: Color,
    pub medium: Color,
    pub low: Color,
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Theme::dark(),
            ThemeMode::Light => Theme::light(),
        }
    }

    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x12, 0x12, 0x1A),
            text: Color::Rgb(0xC4, 0xC4, 0xD4),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            dim: Color::Rgb(0x6E, 0x6E, 0x85),
            highlight: Color::Rgb(0x5C, 0xC8, 0xFF),
            selection_bg: Color::Rgb(0x2A, 0x2A, 0x3E),
            warning_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            warning_bg: Color::Rgb(0x8D, 0x0B, 0x0B),
            progress_fill: Color::Rgb(0x44, 0xCC, 0x77),
            progress_track: Color::Rgb(0x33, 0x33, 0x44),
            high: Color::Rgb(0xFF, 0x55, 0x55),
            medium: Color::Rgb(0xFF, 0xC0, 0x44),
            low: Color::Rgb(0x55, 0xBB, 0x66),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xFA, 0xFA, 0xF5),
            text: Color::Rgb(0x2A, 0x2A, 0x33),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            dim: Color::Rgb(0x8A, 0x8A, 0x99),
            highlight: Color::Rgb(0x00, 0x66, 0xBB),
            selection_bg: Color::Rgb(0xE2, 0xE6, 0xF0),
            warning_fg: Color::Rgb(0xFF, 0xFF, 0xFF),
            warning_bg: Color::Rgb(0xB3, 0x1D, 0x1D),
            progress_fill: Color::Rgb(0x2E, 0x9E, 0x55),
            progress_track: Color::Rgb(0xD5, 0xD5, 0xCC),
            high: Color::Rgb(0xCC, 0x22, 0x22),
            medium: Color::Rgb(0xB0, 0x77, 0x00),
            low: Color::Rgb(0x2E, 0x8E, 0x44),
        }
    }

    /// Accent color for a task's priority
    pub fn priority_color(&self, priority: Priority) -> Color {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }
}
