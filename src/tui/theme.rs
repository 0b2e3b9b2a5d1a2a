//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;
use serde::{Deserialize, Serialize};

/// Theme selection as written in the config file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Detect from the terminal background
    #[default]
    Auto,
    Dark,
    Light,
}

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Score colors
    pub score_positive: Color,
    pub score_negative: Color,
    pub leader: Color,

    // Score bar colors
    pub bar_filled: Color,
    pub bar_empty: Color,

    // Table colors
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub header_style: Style,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,

    // Tab colors
    pub tab_active_style: Style,
    pub tab_inactive_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,
    pub input_disabled: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            score_positive: Color::Green,
            score_negative: Color::Red,
            leader: Color::Yellow,
            bar_filled: Color::Cyan,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            tab_active_style: Style::new().fg(Color::Cyan).bold(),
            tab_inactive_style: Style::new().fg(Color::DarkGray),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
            input_disabled: Color::DarkGray,
        }
    }

    pub fn light() -> Self {
        Self {
            score_positive: Color::Rgb(0, 120, 0),
            score_negative: Color::Rgb(170, 0, 0),
            leader: Color::Rgb(150, 100, 0),
            bar_filled: Color::Blue,
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            header_style: Style::new().bold(),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(240),
            title_color: Color::Blue,
            tab_active_style: Style::new().fg(Color::Blue).bold(),
            tab_inactive_style: Style::new().fg(Color::Indexed(245)),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 120, 0),
            flash_error: Color::Rgb(170, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
            input_disabled: Color::Indexed(248),
        }
    }

    /// Color for a running total
    pub fn score_color(&self, score: i64) -> Color {
        if score < 0 {
            self.score_negative
        } else {
            self.score_positive
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luma and
/// falls back to dark when the terminal does not answer.
pub fn resolve_theme(theme: Theme) -> ThemeColors {
    match theme {
        Theme::Dark => ThemeColors::dark(),
        Theme::Light => ThemeColors::light(),
        Theme::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
