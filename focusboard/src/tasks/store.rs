//! Task store: the ordered task sequence and its persistence.
//!
//! Every successful mutation writes the full sequence back to storage and
//! then bumps [`TaskStore::revision`], which the renderer uses as its
//! change signal. In-memory and stored state therefore never differ by more
//! than the operation currently executing.

use std::sync::Arc;

use chrono::NaiveDate;
use focusboard_model::TASKS_KEY;
use focusboard_model::codec::{decode_tasks, encode_tasks};
use focusboard_model::task::{Priority, Task, parse_due_date};

use super::TaskError;
use crate::storage::Storage;

/// Result of [`TaskStore::edit_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEdit {
    /// The task was renamed.
    Renamed,
    /// The new name was blank, so the task was deleted.
    Deleted(Task),
}

/// Owns the ordered list of tasks.
pub struct TaskStore {
    tasks: Vec<Task>,
    storage: Arc<dyn Storage>,
    revision: u64,
}

impl TaskStore {
    /// Creates an empty store that persists to `storage`, without loading.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            tasks: Vec::new(),
            storage,
            revision: 0,
        }
    }

    /// Creates a store and loads whatever `storage` currently holds.
    #[must_use]
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    /// Replaces the in-memory sequence with the stored one.
    ///
    /// Older records are normalized on the way in. Missing or malformed
    /// data yields an empty sequence.
    pub fn load(&mut self) {
        self.tasks = self
            .storage
            .get(TASKS_KEY)
            .map(|blob| decode_tasks(&blob))
            .unwrap_or_default();
        self.revision += 1;
        tracing::debug!(count = self.tasks.len(), "tasks loaded");
    }

    /// Appends a new open task named `trim(name)`.
    ///
    /// Returns `false` and changes nothing if the trimmed name is empty.
    pub fn add(&mut self, name: &str) -> bool {
        let Some(task) = Task::new(name) else {
            return false;
        };
        self.tasks.push(task);
        self.commit();
        true
    }

    /// Removes and returns the task at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn delete(&mut self, index: usize) -> Result<Task, TaskError> {
        self.check_index(index)?;
        let task = self.tasks.remove(index);
        self.commit();
        Ok(task)
    }

    /// Flips the completion flag and returns its new value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn toggle_completion(&mut self, index: usize) -> Result<bool, TaskError> {
        let task = self.task_mut(index)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.commit();
        Ok(completed)
    }

    /// Renames a task, or deletes it if the trimmed name is empty.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn edit_name(&mut self, index: usize, new_name: &str) -> Result<NameEdit, TaskError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return self.delete(index).map(NameEdit::Deleted);
        }
        self.task_mut(index)?.name = trimmed.to_string();
        self.commit();
        Ok(NameEdit::Renamed)
    }

    /// Sets the due date from a `YYYY-MM-DD` string; empty clears it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid, or
    /// [`TaskError::InvalidDueDate`] if the value is not a calendar date.
    pub fn edit_due_date(&mut self, index: usize, value: &str) -> Result<(), TaskError> {
        self.check_index(index)?;
        let due_date = parse_due_date(value)?;
        self.set_due_date(index, due_date)
    }

    /// Sets or clears the due date.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn set_due_date(&mut self, index: usize, due_date: Option<NaiveDate>) -> Result<(), TaskError> {
        self.task_mut(index)?.due_date = due_date;
        self.commit();
        Ok(())
    }

    /// Sets the priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if `index` is not valid.
    pub fn edit_priority(&mut self, index: usize, priority: Priority) -> Result<(), TaskError> {
        self.task_mut(index)?.priority = priority;
        self.commit();
        Ok(())
    }

    /// Removes every completed task, keeping the others in order.
    ///
    /// Returns how many tasks were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.completed);
        let removed = before - self.tasks.len();
        self.commit();
        removed
    }

    /// Moves the task at `from` so that it ends up at position `to`.
    ///
    /// Intervening tasks shift by one; this is a move, not a swap.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IndexOutOfRange`] if either index is not valid.
    /// Both refer to positions in a sequence of the current length.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), TaskError> {
        self.check_index(from)?;
        self.check_index(to)?;
        let task = self.tasks.remove(from);
        self.tasks.insert(to, task);
        self.commit();
        Ok(())
    }

    /// Returns a copy of the current sequence.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    /// Returns a read-only view of the current sequence.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there are no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of completed tasks.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Change counter, bumped after every load and persisted mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    fn check_index(&self, index: usize) -> Result<(), TaskError> {
        if index < self.tasks.len() {
            Ok(())
        } else {
            Err(TaskError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            })
        }
    }

    fn task_mut(&mut self, index: usize) -> Result<&mut Task, TaskError> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(TaskError::IndexOutOfRange { index, len })
    }

    /// Persists the sequence, then signals the change.
    fn commit(&mut self) {
        match encode_tasks(&self.tasks) {
            Ok(blob) => {
                if let Err(e) = self.storage.set(TASKS_KEY, &blob) {
                    tracing::warn!(error = %e, "failed to persist tasks");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode tasks"),
        }
        self.revision += 1;
    }
}
