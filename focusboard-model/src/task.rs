//! Task records for Focusboard.
//!
//! A [`Task`] has no identifier of its own: it is addressed by its position
//! in the task sequence. The serialized shape (camelCase field names,
//! lowercase priority strings, `YYYY-MM-DD` due dates) is what gets
//! written under [`TASKS_KEY`](crate::TASKS_KEY).

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format of due dates in storage and in edit drafts.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from parsing user-supplied task field values.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    /// The priority string is not one of `none`, `low`, `medium`, `high`.
    #[error("unknown priority: {0:?}")]
    UnknownPriority(String),
    /// The due date is neither empty nor a `YYYY-MM-DD` calendar date.
    #[error("invalid due date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDueDate(String),
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// No priority set.
    #[default]
    None,
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 4] = [Self::None, Self::Low, Self::Medium, Self::High];

    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the next priority, wrapping from `High` back to `None`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::None => Self::Low,
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High => Self::None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| FieldError::UnknownPriority(s.to_string()))
    }
}

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Display text, always trimmed and non-empty.
    pub name: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Optional calendar due date.
    pub due_date: Option<NaiveDate>,
    /// Task priority.
    pub priority: Priority,
}

impl Task {
    /// Creates an open task with no due date and no priority.
    ///
    /// Returns `None` if `name` is empty after trimming.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            completed: false,
            due_date: None,
            priority: Priority::None,
        })
    }

    /// Whether the task is overdue on `today`.
    ///
    /// Both sides are calendar dates, so time of day never matters.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }
}

/// Parses a due-date field value: empty means "no due date".
///
/// # Errors
///
/// Returns [`FieldError::InvalidDueDate`] if the trimmed value is non-empty
/// and not a `YYYY-MM-DD` date.
pub fn parse_due_date(value: &str) -> Result<Option<NaiveDate>, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| FieldError::InvalidDueDate(value.to_string()))
}

/// Formats an optional due date the way edit drafts show it.
#[must_use]
pub fn format_due_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DUE_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
