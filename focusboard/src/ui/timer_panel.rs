//! Interval timer panel.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};

use super::theme::Palette;
use crate::app::App;

/// Render the timer: phase, countdown, progress and session count.
pub fn render(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let timer = app.timer();
    let block = Block::default()
        .title(Span::styled(" Focus timer ", palette.highlighted()))
        .borders(Borders::ALL)
        .border_style(palette.normal());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let mode_color = if timer.mode().is_break() {
        palette.success
    } else {
        palette.highlight
    };
    let state = if timer.is_paused() { "paused" } else { "running" };
    let header = vec![
        Line::from(vec![
            Span::styled(timer.mode().label(), palette.bold().fg(mode_color)),
            Span::styled(format!("  ({state})"), palette.dimmed()),
        ]),
        Line::styled(timer.format_remaining(), palette.bold()),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(palette.normal().fg(mode_color))
        .ratio(timer.progress())
        .label("");
    frame.render_widget(gauge, chunks[1]);

    let sessions = Line::styled(
        format!("Work sessions: {}", timer.work_sessions_completed()),
        palette.dimmed(),
    );
    frame.render_widget(Paragraph::new(sessions), chunks[2]);

    let help = vec![
        Line::styled("s start/pause", palette.dimmed()),
        Line::styled("r reset  n skip", palette.dimmed()),
    ];
    frame.render_widget(Paragraph::new(help), chunks[3]);
}
