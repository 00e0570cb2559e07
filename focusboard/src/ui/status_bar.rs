//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::Palette;
use crate::app::{App, Mode, NoticeKind};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let help_text = match app.mode {
        Mode::Browse => {
            "a: add | space: toggle | e/d/p: name/due/priority | J/K: move | x: delete | c: clear done | t: theme | q: quit"
        }
        Mode::Adding(_) => "Enter: add | Esc: done",
        Mode::Editing => "Enter: save | Esc/Tab: save and leave",
    };

    let mut spans = vec![
        Span::styled(app.clock_text.as_str(), palette.bold()),
        Span::raw(" | "),
    ];

    match app.active_notice() {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Celebration => palette.success,
                NoticeKind::Info => palette.highlight,
                NoticeKind::Error => palette.error,
            };
            spans.push(Span::styled(notice.text.as_str(), palette.bold().fg(color)));
        }
        None => spans.push(Span::styled(help_text, palette.dimmed())),
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(palette.status_bar());
    frame.render_widget(paragraph, area);
}
