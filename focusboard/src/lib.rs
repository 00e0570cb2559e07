//! `Focusboard`: terminal task board with a Pomodoro timer.

pub mod app;
pub mod clock;
pub mod config;
pub mod storage;
pub mod tasks;
pub mod theme;
pub mod timer;
pub mod ui;
