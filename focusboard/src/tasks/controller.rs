//! Task list controller: intent dispatch plus drag and edit sessions.
//!
//! The renderer reports what the user did as an [`Intent`]; the controller
//! turns it into [`TaskStore`] calls. Drag-reorder and inline-edit state
//! live here rather than in the store because they are transient and never
//! persisted.

use chrono::NaiveDate;
use focusboard_model::task::{Priority, format_due_date};

use super::drag::{DragSession, ItemBounds};
use super::edit::{EditField, EditSession, EditSignal};
use super::store::TaskStore;
use super::view::TaskRow;
use super::TaskError;

/// An interaction reported by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Add a task with the given text.
    Add(String),
    /// Delete the task at an index.
    Delete(usize),
    /// Toggle completion of the task at an index.
    Toggle(usize),
    /// Rename the task at an index (blank deletes it).
    EditName(usize, String),
    /// Set the due date (`YYYY-MM-DD`, or empty to clear).
    EditDueDate(usize, String),
    /// Set the priority from its string form.
    EditPriority(usize, String),
    /// Remove all completed tasks.
    ClearCompleted,
    /// Begin dragging the task at an index.
    DragStart(usize),
    /// Pointer moved during a drag.
    DragOver {
        /// Pointer position.
        pointer_y: f64,
        /// Geometry of each rendered item, in visual order.
        bounds: Vec<ItemBounds>,
    },
    /// Drag released over the list.
    Drop,
    /// Drag ended, with or without a drop.
    DragEnd,
}

impl Intent {
    /// Store index this intent addresses, if any.
    #[must_use]
    pub const fn target_index(&self) -> Option<usize> {
        match self {
            Self::Delete(i)
            | Self::Toggle(i)
            | Self::EditName(i, _)
            | Self::EditDueDate(i, _)
            | Self::EditPriority(i, _)
            | Self::DragStart(i) => Some(*i),
            _ => None,
        }
    }

    /// Whether the input focus moves away from an inline editor.
    const fn takes_focus(&self) -> bool {
        !matches!(self, Self::DragOver { .. } | Self::Drop | Self::DragEnd)
    }
}

/// What a dispatched intent did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Unchanged,
    /// The task sequence changed and was persisted.
    Changed,
    /// A task was just marked complete (the renderer may celebrate).
    TaskCompleted,
    /// Only the provisional drag order changed.
    DragPreview,
}

/// Translates intents into store operations.
pub struct TaskListController {
    store: TaskStore,
    drag: Option<DragSession>,
    edit: Option<EditSession>,
}

impl TaskListController {
    /// Wraps a store.
    #[must_use]
    pub const fn new(store: TaskStore) -> Self {
        Self {
            store,
            drag: None,
            edit: None,
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Handles one intent to completion.
    ///
    /// Any inline edit in progress is committed first, as if its input had
    /// lost focus. If that commit removes a task, index-addressed intents
    /// were computed against a list that no longer exists and are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] for contract violations (stale index, unknown
    /// priority, malformed due date); the sequence is left unchanged.
    pub fn dispatch(&mut self, intent: Intent) -> Result<Outcome, TaskError> {
        tracing::debug!(?intent, "dispatching task intent");

        if intent.takes_focus() && self.finish_active_edit() && intent.target_index().is_some() {
            tracing::debug!("list shifted while committing an edit, intent dropped");
            return Ok(Outcome::Changed);
        }

        match intent {
            Intent::Add(text) => Ok(if self.store.add(&text) {
                Outcome::Changed
            } else {
                Outcome::Unchanged
            }),
            Intent::Delete(index) => self.store.delete(index).map(|_| Outcome::Changed),
            Intent::Toggle(index) => self.toggle(index),
            Intent::EditName(index, text) => {
                self.store.edit_name(index, &text).map(|_| Outcome::Changed)
            }
            Intent::EditDueDate(index, value) => self
                .store
                .edit_due_date(index, &value)
                .map(|()| Outcome::Changed),
            Intent::EditPriority(index, value) => {
                let priority: Priority = value.parse()?;
                self.store
                    .edit_priority(index, priority)
                    .map(|()| Outcome::Changed)
            }
            Intent::ClearCompleted => {
                let removed = self.store.clear_completed();
                tracing::debug!(removed, "cleared completed tasks");
                Ok(Outcome::Changed)
            }
            Intent::DragStart(index) => Ok(self.drag_start(index)),
            Intent::DragOver { pointer_y, bounds } => Ok(self.drag_over(pointer_y, &bounds)),
            Intent::Drop => self.drop_dragged(),
            Intent::DragEnd => {
                self.drag_end();
                Ok(Outcome::Unchanged)
            }
        }
    }

    fn toggle(&mut self, index: usize) -> Result<Outcome, TaskError> {
        let completed = self.store.toggle_completion(index)?;
        Ok(if completed {
            Outcome::TaskCompleted
        } else {
            Outcome::Changed
        })
    }

    // --- drag reorder ---

    /// Begins a drag of the task at `index`, replacing any previous drag.
    pub fn drag_start(&mut self, index: usize) -> Outcome {
        self.drag = DragSession::start(index, self.store.len())
            .map(|session| session.at_revision(self.store.revision()));
        if self.drag.is_none() {
            tracing::debug!(index, "drag start on a missing task ignored");
        }
        Outcome::Unchanged
    }

    /// Updates the provisional position of the dragged task.
    pub fn drag_over(&mut self, pointer_y: f64, bounds: &[ItemBounds]) -> Outcome {
        match self
            .drag
            .as_mut()
            .map(|session| session.drag_over(pointer_y, bounds))
        {
            Some(true) => Outcome::DragPreview,
            _ => Outcome::Unchanged,
        }
    }

    /// Commits the drag: the dragged task moves to its visual position.
    ///
    /// A drag whose list changed in any way since it started is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] only if the store rejects the reorder.
    pub fn drop_dragged(&mut self) -> Result<Outcome, TaskError> {
        let Some(session) = self.drag.take() else {
            return Ok(Outcome::Unchanged);
        };
        let from = session.from_index();
        let target = session.visual_position();
        match target {
            Some(to) if self.is_current(&session) => {
                if from == to {
                    return Ok(Outcome::Unchanged);
                }
                self.store.reorder(from, to)?;
                tracing::debug!(from, to, "task reordered by drag");
                Ok(Outcome::Changed)
            }
            _ => {
                tracing::warn!(from, ?target, "stale drag discarded");
                Ok(Outcome::Unchanged)
            }
        }
    }

    /// Ends the drag without committing anything.
    pub fn drag_end(&mut self) {
        self.drag = None;
    }

    /// The current drag session, if any.
    #[must_use]
    pub const fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Store indices in the order they should be displayed.
    #[must_use]
    pub fn display_order(&self) -> Vec<usize> {
        match &self.drag {
            Some(session) if self.is_current(session) => session.visual_order().to_vec(),
            _ => (0..self.store.len()).collect(),
        }
    }

    /// Whether `session` was started against the store's current contents.
    fn is_current(&self, session: &DragSession) -> bool {
        session.revision() == self.store.revision() && session.sequence_len() == self.store.len()
    }

    /// Render rows in display order.
    #[must_use]
    pub fn rows(&self, today: NaiveDate) -> Vec<TaskRow> {
        let dragged = self
            .drag
            .as_ref()
            .filter(|session| self.is_current(session))
            .map(DragSession::from_index);
        self.display_order()
            .into_iter()
            .filter_map(|index| {
                let task = self.store.get(index)?;
                let mut row = TaskRow::from_task(index, task, today);
                row.dragging = dragged == Some(index);
                Some(row)
            })
            .collect()
    }

    // --- keyboard reorder ---

    /// Moves the task at `index` one place up.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn move_up(&mut self, index: usize) -> Result<Outcome, TaskError> {
        if index == 0 {
            return self.store.get(0).map_or(
                Err(TaskError::IndexOutOfRange { index, len: 0 }),
                |_| Ok(Outcome::Unchanged),
            );
        }
        self.store.reorder(index, index - 1)?;
        Ok(Outcome::Changed)
    }

    /// Moves the task at `index` one place down.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn move_down(&mut self, index: usize) -> Result<Outcome, TaskError> {
        let len = self.store.len();
        if index >= len {
            return Err(TaskError::IndexOutOfRange { index, len });
        }
        if index + 1 == len {
            return Ok(Outcome::Unchanged);
        }
        self.store.reorder(index, index + 1)?;
        Ok(Outcome::Changed)
    }

    // --- inline edit ---

    /// Opens an inline editor on `field` of the task at `index`.
    ///
    /// An edit already in progress is committed first. If that commit
    /// removes a task the new edit is not opened, since `index` may now
    /// address a different task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn begin_edit(&mut self, index: usize, field: EditField) -> Result<Outcome, TaskError> {
        if self.finish_active_edit() {
            return Ok(Outcome::Changed);
        }
        let len = self.store.len();
        let task = self
            .store
            .get(index)
            .ok_or(TaskError::IndexOutOfRange { index, len })?;
        let initial = match field {
            EditField::Name => task.name.clone(),
            EditField::DueDate => format_due_date(task.due_date),
        };
        self.edit = Some(EditSession::new(index, field, initial));
        Ok(Outcome::Unchanged)
    }

    /// The edit in progress, if any.
    #[must_use]
    pub const fn edit_session(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Mutable access to the edit draft.
    pub const fn edit_session_mut(&mut self) -> Option<&mut EditSession> {
        self.edit.as_mut()
    }

    /// Delivers a commit signal to the edit in progress.
    ///
    /// The first signal commits the draft and closes the session, so a
    /// focus loss that follows Enter finds nothing left to commit.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError`] if the store rejects the draft; the session is
    /// closed either way.
    pub fn signal_edit(&mut self, signal: EditSignal) -> Result<Outcome, TaskError> {
        let Some(session) = self.edit.take() else {
            tracing::trace!(?signal, "no edit in progress");
            return Ok(Outcome::Unchanged);
        };
        let index = session.index();
        let field = session.field();
        let draft = session.into_text();
        tracing::debug!(index, ?field, ?signal, "committing inline edit");
        match field {
            EditField::Name => self
                .store
                .edit_name(index, &draft)
                .map(|_| Outcome::Changed),
            EditField::DueDate => self
                .store
                .edit_due_date(index, &draft)
                .map(|()| Outcome::Changed),
        }
    }

    /// Commits any active edit through the focus-loss path.
    ///
    /// Returns whether the task count changed as a result.
    fn finish_active_edit(&mut self) -> bool {
        if self.edit.is_none() {
            return false;
        }
        let len = self.store.len();
        if let Err(e) = self.signal_edit(EditSignal::Blur) {
            tracing::warn!(error = %e, "inline edit rejected on focus loss");
        }
        self.store.len() != len
    }
}
