//! Text codec for the persisted task sequence.
//!
//! The blob is a JSON array of task objects. Decoding is lenient: older
//! records without `dueDate`/`priority` are upgraded in place, unusable
//! records are dropped, and a blob that is not a JSON array at all decodes
//! to an empty sequence. Decoding never fails.

use serde::Deserialize;
use serde_json::Value;

use crate::task::{Priority, Task, parse_due_date};

/// Error type for codec operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A task record as found in storage, possibly written by an older schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTask {
    name: String,
    completed: Option<Value>,
    due_date: Option<Value>,
    priority: Option<Value>,
}

impl StoredTask {
    /// Upgrades a stored record to the current [`Task`] shape.
    ///
    /// Returns `None` if the record has no usable name.
    fn normalize(self) -> Option<Task> {
        let mut task = Task::new(&self.name)?;
        task.completed = matches!(self.completed, Some(Value::Bool(true)));
        task.due_date = match self.due_date {
            Some(Value::String(s)) => parse_due_date(&s).ok().flatten(),
            _ => None,
        };
        task.priority = match self.priority {
            Some(Value::String(s)) => s.parse().unwrap_or_default(),
            _ => Priority::None,
        };
        Some(task)
    }
}

/// Encodes a task sequence into the stored text form.
///
/// # Errors
///
/// Returns `CodecError::Serialization` if the sequence cannot be serialized.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, CodecError> {
    serde_json::to_string(tasks).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes a stored blob into a normalized task sequence.
///
/// Missing `dueDate` becomes `None`, missing or unknown `priority`
/// becomes [`Priority::None`], and a non-boolean `completed` is `false`. Applying this to already-normalized data
/// is a no-op.
#[must_use]
pub fn decode_tasks(blob: &str) -> Vec<Task> {
    let records: Vec<Value> = match serde_json::from_str(blob) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(error = %e, "stored task list is malformed, starting empty");
            return Vec::new();
        }
    };

    records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| {
            let task = serde_json::from_value::<StoredTask>(record)
                .ok()
                .and_then(StoredTask::normalize);
            if task.is_none() {
                tracing::warn!(position, "dropping unusable stored task record");
            }
            task
        })
        .collect()
}
