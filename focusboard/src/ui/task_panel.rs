//! Task panel rendering: the list plus the add-task input.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Areas;
use super::theme::Palette;
use crate::app::{App, Mode};
use crate::tasks::{EditField, TaskRow, TextInput};

/// Render the task list and the input line.
pub fn render(frame: &mut Frame, areas: &Areas, app: &App, palette: &Palette) {
    render_list(frame, areas, app, palette);
    render_input(frame, areas.input, app, palette);
}

fn render_list(frame: &mut Frame, areas: &Areas, app: &App, palette: &Palette) {
    let store = app.controller().store();
    let title = format!(" Tasks ({}/{} done) ", store.completed_count(), store.len());
    let border_style = if app.mode == Mode::Browse {
        palette.highlighted()
    } else {
        palette.normal()
    };
    let block = Block::default()
        .title(Span::styled(title, palette.highlighted()))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = areas.task_rows();
    let rows = app.controller().rows(App::today());

    let lines: Vec<Line> = if rows.is_empty() {
        vec![Line::styled("No tasks yet. Press 'a' to add one.", palette.dimmed())]
    } else {
        let offset = app.scroll_offset();
        rows.iter()
            .enumerate()
            .skip(offset)
            .take(usize::from(inner.height))
            .map(|(slot, row)| task_line(row, slot == app.selected, app, palette))
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), areas.task_list);
}

fn task_line<'a>(row: &'a TaskRow, selected: bool, app: &'a App, palette: &Palette) -> Line<'a> {
    let checkbox = if row.completed { "[✓] " } else { "[ ] " };
    let checkbox_style = if row.completed {
        palette.normal().fg(palette.success)
    } else {
        palette.normal()
    };

    let editing = app
        .controller()
        .edit_session()
        .filter(|session| session.index() == row.index);

    let mut spans = vec![Span::styled(checkbox, checkbox_style)];

    match editing {
        Some(session) if session.field() == EditField::Name => {
            spans.extend(input_spans(session.input(), palette));
        }
        _ => {
            let name_style = if row.completed {
                palette.completed()
            } else {
                palette.normal()
            };
            spans.push(Span::styled(row.name.as_str(), name_style));
        }
    }

    if let Some(color) = palette.priority_color(row.priority) {
        spans.push(Span::styled(
            format!("  !{}", row.priority),
            palette.normal().fg(color),
        ));
    }

    match editing {
        Some(session) if session.field() == EditField::DueDate => {
            spans.push(Span::styled("  due ", palette.dimmed()));
            spans.extend(input_spans(session.input(), palette));
        }
        _ => {
            if let Some(date) = row.due_date {
                let text = format!("  due {}", date.format(&app.date_format));
                let style = if row.overdue {
                    palette.overdue()
                } else {
                    palette.dimmed()
                };
                spans.push(Span::styled(text, style));
            }
        }
    }

    let line = Line::from(spans);
    if row.dragging {
        line.style(palette.dragging())
    } else if selected && editing.is_none() {
        line.style(palette.selected())
    } else {
        line
    }
}

/// Spans for a text input with a visible cursor.
fn input_spans<'a>(input: &'a TextInput, palette: &Palette) -> Vec<Span<'a>> {
    let text = input.text();
    let split = text
        .char_indices()
        .nth(input.cursor())
        .map_or(text.len(), |(i, _)| i);
    let (before, rest) = text.split_at(split);
    let mut chars = rest.chars();
    let under = chars.next().map_or_else(|| " ".to_string(), String::from);
    vec![
        Span::styled(before, palette.normal()),
        Span::styled(under, palette.input_cursor()),
        Span::styled(chars.as_str(), palette.normal()),
    ]
}

fn render_input(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let (line, border_style) = match &app.mode {
        Mode::Adding(input) => (Line::from(input_spans(input, palette)), palette.highlighted()),
        _ => (
            Line::styled("Press 'a' to add a task", palette.dimmed()),
            palette.normal(),
        ),
    };
    let block = Block::default()
        .title(" New task ")
        .borders(Borders::ALL)
        .border_style(border_style);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
