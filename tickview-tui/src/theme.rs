//! Colour tokens for the viewer.
//!
//! # Color Palette
//! - **Accent**: electric cyan (focus, headers, key hints)
//! - **Positive**: neon green (up days, success)
//! - **Negative**: hot pink (down days, errors)
//! - **Warning**: neon orange (in-flight fetch, warnings)
//! - **Muted**: steel blue (labels, secondary text)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Green when the bar closed at or above its open, pink otherwise.
    /// Bars with missing prices stay neutral.
    pub fn bar_color(&self, open: f64, close: f64) -> Color {
        if !open.is_finite() || !close.is_finite() {
            self.text_primary
        } else if close >= open {
            self.positive
        } else {
            self.negative
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(THEME.positive)
}

pub fn negative() -> Style {
    Style::default().fg(THEME.negative)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn text() -> Style {
    Style::default().fg(THEME.text_primary)
}

/// Border of a block; focused blocks use the accent colour.
pub fn border(focused: bool) -> Style {
    if focused {
        accent()
    } else {
        muted()
    }
}

/// Highlight for the focused form field.
pub fn focused_field() -> Style {
    accent().add_modifier(Modifier::REVERSED)
}

pub fn bar(open: f64, close: f64) -> Style {
    Style::default().fg(THEME.bar_color(open, close))
}
