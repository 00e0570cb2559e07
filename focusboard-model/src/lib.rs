//! Shared data model for Focusboard: task records, the theme preference,
//! and the text codec used for the persisted task blob.

pub mod codec;
pub mod task;
pub mod theme;

/// Storage key holding the serialized task sequence.
pub const TASKS_KEY: &str = "tasks";

/// Storage key holding the theme preference (`"dark"` or `"light"`).
pub const THEME_KEY: &str = "theme";
