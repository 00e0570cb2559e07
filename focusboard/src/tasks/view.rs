//! Read-only rows handed to the renderer.

use chrono::NaiveDate;
use focusboard_model::task::{Priority, Task};

/// Display state of one task, derived from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// Store index of the task (addresses it in intents).
    pub index: usize,
    /// Task name.
    pub name: String,
    /// Completion flag (checkbox and strikethrough).
    pub completed: bool,
    /// Due date, if set.
    pub due_date: Option<NaiveDate>,
    /// Priority (drives the priority styling).
    pub priority: Priority,
    /// Incomplete with a due date before today.
    pub overdue: bool,
    /// This row is the one being dragged.
    pub dragging: bool,
}

impl TaskRow {
    /// Builds the row for `task` at store index `index`.
    #[must_use]
    pub fn from_task(index: usize, task: &Task, today: NaiveDate) -> Self {
        Self {
            index,
            name: task.name.clone(),
            completed: task.completed,
            due_date: task.due_date,
            priority: task.priority,
            overdue: task.is_overdue(today),
            dragging: false,
        }
    }
}
