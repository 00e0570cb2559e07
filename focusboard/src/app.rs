//! Application state and event handling.
//!
//! [`App`] owns every piece of mutable state (task controller, interval
//! timer, theme, tickers) and is driven by the event loop one event at a
//! time, so no mutation ever interleaves with another.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use focusboard_model::task::Priority;
use focusboard_model::theme::ThemePreference;
use ratatui::layout::Rect;
use tokio::sync::mpsc;

use crate::clock;
use crate::config::AppConfig;
use crate::storage::Storage;
use crate::tasks::{
    DragSession, EditField, EditSignal, Intent, ItemBounds, Outcome, TaskError,
    TaskListController, TaskStore, TextInput,
};
use crate::theme::ThemeSetting;
use crate::timer::{IntervalTimer, Tick, TickSource, Ticker, TimerMode};

/// How long a notice stays in the status bar.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Width of the checkbox column at the start of each task row.
const CHECKBOX_WIDTH: u16 = 4;

/// What the keyboard currently drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the task list.
    Browse,
    /// Typing a new task.
    Adding(TextInput),
    /// Editing a task field inline (the session lives in the controller).
    Editing,
}

/// Kind of status-bar notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A task was just completed.
    Celebration,
    /// Timer phase change.
    Info,
    /// A rejected operation.
    Error,
}

/// A transient status-bar message.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Message text.
    pub text: String,
    /// Message kind.
    pub kind: NoticeKind,
    expires_at: Instant,
}

/// Main application state.
pub struct App {
    controller: TaskListController,
    timer: IntervalTimer,
    timer_ticker: Ticker,
    clock_ticker: Ticker,
    theme: ThemeSetting,
    /// Keyboard mode.
    pub mode: Mode,
    /// Selected position in display order.
    pub selected: usize,
    /// Current clock text.
    pub clock_text: String,
    /// Latest status-bar notice.
    pub notice: Option<Notice>,
    /// Display format for due dates.
    pub date_format: String,
    /// Inner area of the task list as last laid out (for mouse mapping).
    pub list_area: Rect,
    /// First display position shown in the task list.
    scroll: usize,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl App {
    /// Builds the app over `storage`, loading tasks and the theme.
    ///
    /// Ticks from both tickers are delivered on `tick_tx`.
    #[must_use]
    pub fn new(config: &AppConfig, storage: Arc<dyn Storage>, tick_tx: mpsc::Sender<Tick>) -> Self {
        let store = TaskStore::open(storage.clone());
        tracing::info!(tasks = store.len(), "task list loaded");
        Self {
            controller: TaskListController::new(store),
            timer: IntervalTimer::new(config.timer),
            timer_ticker: Ticker::new(TickSource::Timer, Duration::from_secs(1), tick_tx.clone()),
            clock_ticker: Ticker::new(TickSource::Clock, Duration::from_secs(1), tick_tx),
            theme: ThemeSetting::load(storage),
            mode: Mode::Browse,
            selected: 0,
            clock_text: clock::now_12h(),
            notice: None,
            date_format: config.date_format.clone(),
            list_area: Rect::default(),
            scroll: 0,
            should_quit: false,
        }
    }

    /// Starts the clock refresh ticker. Must run inside a tokio runtime.
    pub fn start_clock(&mut self) {
        self.clock_ticker.start();
    }

    /// The task controller.
    #[must_use]
    pub const fn controller(&self) -> &TaskListController {
        &self.controller
    }

    /// The interval timer.
    #[must_use]
    pub const fn timer(&self) -> &IntervalTimer {
        &self.timer
    }

    /// The active theme.
    #[must_use]
    pub const fn theme(&self) -> ThemePreference {
        self.theme.current()
    }

    /// Today's date in the local time zone.
    #[must_use]
    pub fn today() -> chrono::NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Store index of the selected row, if any.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.controller.display_order().get(self.selected).copied()
    }

    /// The active notice, if it has not expired.
    #[must_use]
    pub fn active_notice(&self) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|n| n.expires_at > Instant::now())
    }

    fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            kind,
            expires_at: Instant::now() + NOTICE_TTL,
        });
    }

    // --- ticks ---

    /// Applies a tick from one of the tickers. Stale ticks are ignored.
    pub fn handle_tick(&mut self, tick: Tick) {
        match tick.source {
            TickSource::Clock if self.clock_ticker.accepts(&tick) => {
                self.clock_text = clock::now_12h();
            }
            TickSource::Timer if self.timer_ticker.accepts(&tick) => {
                if let Some(mode) = self.timer.tick() {
                    self.timer_ticker.stop();
                    self.announce_phase(mode);
                }
            }
            _ => tracing::trace!(?tick, "stale tick ignored"),
        }
    }

    fn announce_phase(&mut self, mode: TimerMode) {
        let text = if mode.is_break() {
            format!("Work session done, time for a {}", mode.label().to_lowercase())
        } else {
            "Break over, back to work".to_string()
        };
        self.notify(NoticeKind::Info, text);
    }

    // --- timer controls ---

    /// Starts the timer if paused, pauses it if running.
    pub fn toggle_timer(&mut self) {
        if self.timer.is_paused() {
            self.timer.start();
            self.timer_ticker.start();
        } else {
            self.timer.pause();
            self.timer_ticker.stop();
        }
    }

    /// Resets the current timer phase.
    pub fn reset_timer(&mut self) {
        self.timer_ticker.stop();
        self.timer.reset();
    }

    /// Skips to the next timer phase.
    pub fn skip_timer(&mut self) {
        self.timer_ticker.stop();
        let mode = self.timer.skip();
        self.announce_phase(mode);
    }

    // --- intents ---

    /// Dispatches an intent and reports its outcome to the user.
    pub fn apply(&mut self, intent: Intent) -> Option<Outcome> {
        match self.controller.dispatch(intent) {
            Ok(outcome) => {
                self.after_outcome(outcome);
                Some(outcome)
            }
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    fn after_outcome(&mut self, outcome: Outcome) {
        if outcome == Outcome::TaskCompleted {
            self.notify(NoticeKind::Celebration, "Task complete! Nice work.");
        }
        if !matches!(self.mode, Mode::Adding(_)) && self.controller.edit_session().is_none() {
            self.mode = Mode::Browse;
        }
        self.clamp_selection();
    }

    fn report(&mut self, err: &TaskError) {
        tracing::warn!(error = %err, "task operation rejected");
        self.notify(NoticeKind::Error, err.to_string());
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.store().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // --- keyboard ---

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Browse => self.handle_browse_key(key),
            Mode::Adding(_) => self.handle_adding_key(key),
            Mode::Editing => self.handle_editing_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        let selected = self.selected_index();
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('a' | 'i') => self.mode = Mode::Adding(TextInput::default()),
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
                self.clamp_selection();
            }
            KeyCode::Char('K') => self.move_selected(true),
            KeyCode::Char('J') => self.move_selected(false),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(index) = selected {
                    self.apply(Intent::Toggle(index));
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(index) = selected {
                    self.apply(Intent::Delete(index));
                }
            }
            KeyCode::Char('e') => self.begin_edit(EditField::Name),
            KeyCode::Char('d') => self.begin_edit(EditField::DueDate),
            KeyCode::Char('p') => {
                if let Some(index) = selected {
                    self.cycle_priority(index);
                }
            }
            KeyCode::Char('c') => {
                self.apply(Intent::ClearCompleted);
            }
            KeyCode::Char('t') => {
                self.theme.toggle();
            }
            KeyCode::Char('s') => self.toggle_timer(),
            KeyCode::Char('r') => self.reset_timer(),
            KeyCode::Char('n') => self.skip_timer(),
            _ => {}
        }
    }

    fn handle_adding_key(&mut self, key: KeyEvent) {
        let Mode::Adding(input) = &mut self.mode else {
            return;
        };
        match key.code {
            KeyCode::Enter => {
                let text = input.take();
                if self.apply(Intent::Add(text)) == Some(Outcome::Changed) {
                    self.selected = self.controller.store().len().saturating_sub(1);
                }
            }
            KeyCode::Esc | KeyCode::Tab => self.mode = Mode::Browse,
            _ => edit_text(input, key),
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let signal = match key.code {
            KeyCode::Enter => Some(EditSignal::Confirm),
            KeyCode::Esc | KeyCode::Tab | KeyCode::Up | KeyCode::Down => Some(EditSignal::Blur),
            _ => None,
        };
        match signal {
            Some(signal) => self.finish_edit(signal),
            None => {
                if let Some(session) = self.controller.edit_session_mut() {
                    edit_text(session.input_mut(), key);
                }
            }
        }
    }

    fn begin_edit(&mut self, field: EditField) {
        let Some(index) = self.selected_index() else {
            return;
        };
        match self.controller.begin_edit(index, field) {
            Ok(_) if self.controller.edit_session().is_some() => self.mode = Mode::Editing,
            Ok(outcome) => self.after_outcome(outcome),
            Err(e) => self.report(&e),
        }
    }

    fn finish_edit(&mut self, signal: EditSignal) {
        let result = self.controller.signal_edit(signal);
        self.mode = Mode::Browse;
        match result {
            Ok(outcome) => self.after_outcome(outcome),
            Err(e) => self.report(&e),
        }
    }

    fn cycle_priority(&mut self, index: usize) {
        let next = self
            .controller
            .store()
            .get(index)
            .map_or(Priority::None, |t| t.priority.next());
        self.apply(Intent::EditPriority(index, next.as_str().to_string()));
    }

    fn move_selected(&mut self, up: bool) {
        let Some(index) = self.selected_index() else {
            return;
        };
        let result = if up {
            self.controller.move_up(index)
        } else {
            self.controller.move_down(index)
        };
        match result {
            Ok(Outcome::Changed) => {
                self.selected = if up { index - 1 } else { index + 1 };
            }
            Ok(_) => {}
            Err(e) => self.report(&e),
        }
    }

    // --- mouse ---

    /// First display position shown in the task list.
    #[must_use]
    pub const fn scroll_offset(&self) -> usize {
        self.scroll
    }

    /// Moves the visible window only as far as needed to keep the
    /// selection on screen. Call after `list_area` is updated.
    pub fn sync_scroll(&mut self) {
        let height = usize::from(self.list_area.height.max(1));
        let len = self.controller.store().len();
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected + 1 - height;
        }
        self.scroll = self.scroll.min(len.saturating_sub(height));
    }

    /// Display position under terminal row `row`, if it is a task row.
    fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.list_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        if !inside {
            return None;
        }
        let slot = usize::from(row - area.y) + self.scroll;
        (slot < self.controller.store().len()).then_some(slot)
    }

    /// Geometry of every display slot, one terminal row each.
    fn slot_bounds(&self) -> Vec<ItemBounds> {
        let offset = self.scroll as f64;
        let top = f64::from(self.list_area.y);
        (0..self.controller.store().len())
            .map(|slot| ItemBounds::new(top + slot as f64 - offset, 1.0))
            .collect()
    }

    /// Handle a mouse event: click to toggle or select, drag to reorder.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if self.mode != Mode::Browse {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(slot) = self.slot_at(mouse.column, mouse.row) else {
                    return;
                };
                self.selected = slot;
                let Some(index) = self.selected_index() else {
                    return;
                };
                if mouse.column < self.list_area.x + CHECKBOX_WIDTH {
                    self.apply(Intent::Toggle(index));
                } else {
                    self.apply(Intent::DragStart(index));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(current) = self
                    .controller
                    .drag_session()
                    .and_then(DragSession::visual_position)
                else {
                    return;
                };
                // Aim into the upper or lower half of the hovered row so the
                // dragged task lands on it whichever way it is moving.
                let hovered =
                    f64::from(mouse.row) - f64::from(self.list_area.y) + self.scroll as f64;
                let bias = if hovered <= current as f64 { 0.25 } else { 0.75 };
                let pointer_y = f64::from(mouse.row) + bias;
                let bounds = self.slot_bounds();
                self.apply(Intent::DragOver { pointer_y, bounds });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(session) = self.controller.drag_session() else {
                    return;
                };
                let dragged = session.from_index();
                if self.slot_at(mouse.column, mouse.row).is_some() {
                    let landed = self
                        .controller
                        .drag_session()
                        .and_then(|s| s.visual_position());
                    if self.apply(Intent::Drop) == Some(Outcome::Changed) {
                        self.selected = landed.unwrap_or(dragged);
                    }
                }
                self.apply(Intent::DragEnd);
            }
            _ => {}
        }
    }
}

/// Applies an editing key to a text input.
fn edit_text(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) => input.insert_char(c),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        _ => {}
    }
}
