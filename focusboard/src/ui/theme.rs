//! Theme and styling for the TUI.
//!
//! Every color comes from a [`Palette`]; the light and dark palettes are
//! selected by the persisted [`ThemePreference`].

use focusboard_model::task::Priority;
use focusboard_model::theme::ThemePreference;
use ratatui::style::{Color, Modifier, Style};

/// Colors used by one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary foreground color.
    pub fg: Color,
    /// Secondary foreground color (dimmed text).
    pub fg_dim: Color,
    /// Background color.
    pub bg: Color,
    /// Highlight color for focused elements.
    pub highlight: Color,
    /// Success color (completion, celebration).
    pub success: Color,
    /// Warning color.
    pub warning: Color,
    /// Error color (overdue dates, rejected input).
    pub error: Color,
    /// Status bar background.
    pub status_bg: Color,
}

/// Light theme.
pub const LIGHT: Palette = Palette {
    fg: Color::Black,
    fg_dim: Color::DarkGray,
    bg: Color::White,
    highlight: Color::Blue,
    success: Color::Green,
    warning: Color::Rgb(200, 120, 0),
    error: Color::Red,
    status_bg: Color::Rgb(220, 220, 230),
};

/// Dark theme.
pub const DARK: Palette = Palette {
    fg: Color::White,
    fg_dim: Color::Gray,
    bg: Color::Black,
    highlight: Color::Cyan,
    success: Color::LightGreen,
    warning: Color::Yellow,
    error: Color::LightRed,
    status_bg: Color::Rgb(30, 30, 50),
};

/// Palette for a theme preference.
#[must_use]
pub const fn palette(theme: ThemePreference) -> Palette {
    match theme {
        ThemePreference::Light => LIGHT,
        ThemePreference::Dark => DARK,
    }
}

impl Palette {
    /// Base style: foreground on background.
    #[must_use]
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Normal text style.
    #[must_use]
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg)
    }

    /// Dimmed text style.
    #[must_use]
    pub fn dimmed(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Bold text style.
    #[must_use]
    pub fn bold(&self) -> Style {
        self.normal().add_modifier(Modifier::BOLD)
    }

    /// Highlighted text style (focused panel borders, titles).
    #[must_use]
    pub fn highlighted(&self) -> Style {
        Style::default()
            .fg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row style.
    #[must_use]
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for a completed task name.
    #[must_use]
    pub fn completed(&self) -> Style {
        self.dimmed().add_modifier(Modifier::CROSSED_OUT)
    }

    /// Style for the row being dragged.
    #[must_use]
    pub fn dragging(&self) -> Style {
        self.normal()
            .add_modifier(Modifier::REVERSED | Modifier::ITALIC)
    }

    /// Style for an overdue due date.
    #[must_use]
    pub fn overdue(&self) -> Style {
        Style::default().fg(self.error).add_modifier(Modifier::BOLD)
    }

    /// Style for the input cursor.
    #[must_use]
    pub fn input_cursor(&self) -> Style {
        self.normal().add_modifier(Modifier::REVERSED)
    }

    /// Status bar style.
    #[must_use]
    pub fn status_bar(&self) -> Style {
        Style::default().fg(self.fg).bg(self.status_bg)
    }

    /// Color marking a task's priority; `None` for no priority.
    #[must_use]
    pub const fn priority_color(&self, priority: Priority) -> Option<Color> {
        match priority {
            Priority::None => None,
            Priority::Low => Some(self.success),
            Priority::Medium => Some(self.warning),
            Priority::High => Some(self.error),
        }
    }
}
