//! Task list state for Focusboard.
//!
//! [`TaskStore`] owns the ordered task sequence and persists it through a
//! [`Storage`](crate::storage::Storage) adapter after every mutation.
//! [`TaskListController`] turns interaction intents into store calls and
//! owns the transient drag-reorder and inline-edit sessions.

pub mod controller;
pub mod drag;
pub mod edit;
pub mod store;
pub mod view;

pub use controller::{Intent, Outcome, TaskListController};
pub use drag::{DragSession, ItemBounds, insertion_target};
pub use edit::{EditField, EditSession, EditSignal, TextInput};
pub use store::{NameEdit, TaskStore};
pub use view::TaskRow;

use focusboard_model::task::FieldError;
use thiserror::Error;

/// Errors that can occur during task operations.
///
/// These are contract violations: the request is rejected and the task
/// sequence is left untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// Index does not address a task in the current sequence.
    #[error("task index {index} out of range (len {len})")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Sequence length at the time of the request.
        len: usize,
    },
    /// Priority string is not one of the four known values.
    #[error("unknown priority: {0:?}")]
    UnknownPriority(String),
    /// Due date is neither empty nor `YYYY-MM-DD`.
    #[error("invalid due date: {0:?}")]
    InvalidDueDate(String),
}

impl From<FieldError> for TaskError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::UnknownPriority(s) => Self::UnknownPriority(s),
            FieldError::InvalidDueDate(s) => Self::InvalidDueDate(s),
        }
    }
}
