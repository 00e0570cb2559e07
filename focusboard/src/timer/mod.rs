//! Pomodoro-style interval timer.
//!
//! [`IntervalTimer`] is a plain state machine: work, short break and long
//! break, each either paused or running. It does not keep time itself; the
//! caller feeds it one [`tick`](IntervalTimer::tick) per second from a
//! [`Ticker`] while it is running.

pub mod ticker;

pub use ticker::{Tick, TickSource, Ticker};

/// Timer phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Focused work interval.
    Work,
    /// Short rest between work intervals.
    ShortBreak,
    /// Long rest after several work intervals.
    LongBreak,
}

impl TimerMode {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short break",
            Self::LongBreak => "Long break",
        }
    }

    /// Whether this is one of the break phases.
    #[must_use]
    pub const fn is_break(self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Phase lengths in seconds and the long-break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDurations {
    /// Work interval length.
    pub work_secs: u32,
    /// Short break length.
    pub short_break_secs: u32,
    /// Long break length.
    pub long_break_secs: u32,
    /// Every n-th completed work session is followed by a long break.
    pub long_break_every: u32,
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            work_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            long_break_every: 4,
        }
    }
}

impl TimerDurations {
    /// Length of `mode` in seconds.
    #[must_use]
    pub const fn for_mode(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.work_secs,
            TimerMode::ShortBreak => self.short_break_secs,
            TimerMode::LongBreak => self.long_break_secs,
        }
    }
}

/// Work/break interval timer with session counting. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    durations: TimerDurations,
    mode: TimerMode,
    time_left_secs: u32,
    paused: bool,
    work_sessions_completed: u32,
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(TimerDurations::default())
    }
}

impl IntervalTimer {
    /// Creates a paused timer at the start of a work interval.
    #[must_use]
    pub const fn new(durations: TimerDurations) -> Self {
        Self {
            durations,
            mode: TimerMode::Work,
            time_left_secs: durations.work_secs,
            paused: true,
            work_sessions_completed: 0,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub const fn time_left_secs(&self) -> u32 {
        self.time_left_secs
    }

    /// Whether the timer is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Completed work sessions since launch.
    #[must_use]
    pub const fn work_sessions_completed(&self) -> u32 {
        self.work_sessions_completed
    }

    /// Configured durations.
    #[must_use]
    pub const fn durations(&self) -> &TimerDurations {
        &self.durations
    }

    /// Starts (or resumes) counting down.
    pub const fn start(&mut self) {
        self.paused = false;
    }

    /// Stops counting down, keeping the remaining time.
    pub const fn pause(&mut self) {
        self.paused = true;
    }

    /// Pauses and restores the full length of the current phase.
    pub const fn reset(&mut self) {
        self.paused = true;
        self.time_left_secs = self.durations.for_mode(self.mode);
    }

    /// Ends the current phase early and moves to the next one.
    pub fn skip(&mut self) -> TimerMode {
        self.advance()
    }

    /// Counts down one second.
    ///
    /// Returns the new mode when this tick expired the current phase.
    /// Does nothing while paused.
    pub fn tick(&mut self) -> Option<TimerMode> {
        if self.paused {
            return None;
        }
        self.time_left_secs = self.time_left_secs.saturating_sub(1);
        (self.time_left_secs == 0).then(|| self.advance())
    }

    fn advance(&mut self) -> TimerMode {
        let from = self.mode;
        self.mode = match from {
            TimerMode::Work => {
                self.work_sessions_completed += 1;
                let every = self.durations.long_break_every;
                if every > 0 && self.work_sessions_completed % every == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => TimerMode::Work,
        };
        self.time_left_secs = self.durations.for_mode(self.mode);
        self.paused = true;
        tracing::info!(
            from = %from,
            to = %self.mode,
            sessions = self.work_sessions_completed,
            "interval timer advanced"
        );
        self.mode
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format!(
            "{:02}:{:02}",
            self.time_left_secs / 60,
            self.time_left_secs % 60
        )
    }

    /// Fraction of the current phase already elapsed, in `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let total = self.durations.for_mode(self.mode);
        if total == 0 {
            return 1.0;
        }
        (1.0 - f64::from(self.time_left_secs) / f64::from(total)).clamp(0.0, 1.0)
    }
}
