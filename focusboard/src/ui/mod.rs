//! Terminal UI rendering.

pub mod status_bar;
pub mod task_panel;
pub mod theme;
pub mod timer_panel;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders},
};

use crate::app::App;

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    /// Task list block (with borders).
    pub task_list: Rect,
    /// Add-task input block.
    pub input: Rect,
    /// Timer panel.
    pub timer: Rect,
    /// One-line status bar.
    pub status: Rect,
}

impl Areas {
    /// Splits the terminal area into panels.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(1)])
            .split(area);

        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(main_chunks[0]);

        let task_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(3)])
            .split(content_chunks[0]);

        Self {
            task_list: task_chunks[0],
            input: task_chunks[1],
            timer: content_chunks[1],
            status: main_chunks[1],
        }
    }

    /// Inner area of the task list, where one task occupies one row.
    #[must_use]
    pub fn task_rows(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.task_list)
    }
}

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = theme::palette(app.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base()), area);

    let areas = Areas::new(area);
    task_panel::render(frame, &areas, app, &palette);
    timer_panel::render(frame, areas.timer, app, &palette);
    status_bar::render(frame, areas.status, app, &palette);
}
