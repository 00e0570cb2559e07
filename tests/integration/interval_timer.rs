//! Integration tests for the interval timer and its tick plumbing.
//!
//! Drives `IntervalTimer` through full work/break cycles, both directly and
//! through a `Ticker` on tokio's paused clock, and checks the clock display.
//!
//! Verification command: `cargo test --test interval_timer`

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use chrono::NaiveTime;
use focusboard::clock::format_12h;
use focusboard::timer::{IntervalTimer, Tick, TickSource, Ticker, TimerDurations, TimerMode};
use tokio::sync::mpsc;

// =============================================================================
// Test helpers
// =============================================================================

/// Starts the timer and ticks until the current phase expires.
fn run_phase(timer: &mut IntervalTimer) -> TimerMode {
    timer.start();
    loop {
        if let Some(next) = timer.tick() {
            return next;
        }
    }
}

fn short_durations() -> TimerDurations {
    TimerDurations {
        work_secs: 3,
        short_break_secs: 2,
        long_break_secs: 5,
        long_break_every: 4,
    }
}

// =============================================================================
// Phase cycle
// =============================================================================

#[test]
fn fourth_work_session_earns_a_long_break() {
    let mut timer = IntervalTimer::default();
    assert_eq!(timer.mode(), TimerMode::Work);
    assert_eq!(timer.time_left_secs(), 1500);
    assert!(timer.is_paused());
    assert_eq!(timer.work_sessions_completed(), 0);

    for session in 1..=3 {
        assert_eq!(run_phase(&mut timer), TimerMode::ShortBreak);
        assert_eq!(timer.time_left_secs(), 300);
        assert_eq!(timer.work_sessions_completed(), session);
        assert!(timer.is_paused());
        assert_eq!(run_phase(&mut timer), TimerMode::Work);
        assert_eq!(timer.time_left_secs(), 1500);
    }

    assert_eq!(run_phase(&mut timer), TimerMode::LongBreak);
    assert_eq!(timer.time_left_secs(), 900);
    assert_eq!(timer.work_sessions_completed(), 4);
}

#[test]
fn long_break_cadence_repeats() {
    let mut timer = IntervalTimer::new(short_durations());
    let mut breaks = Vec::new();
    for _ in 0..8 {
        breaks.push(run_phase(&mut timer));
        run_phase(&mut timer);
    }
    let long: Vec<usize> = breaks
        .iter()
        .enumerate()
        .filter(|(_, mode)| **mode == TimerMode::LongBreak)
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(long, [4, 8]);
}

#[test]
fn skip_counts_as_a_completed_work_session() {
    let mut timer = IntervalTimer::new(short_durations());
    assert_eq!(timer.skip(), TimerMode::ShortBreak);
    assert_eq!(timer.work_sessions_completed(), 1);
    assert_eq!(timer.skip(), TimerMode::Work);
    assert_eq!(timer.work_sessions_completed(), 1);
}

#[test]
fn paused_timer_ignores_ticks() {
    let mut timer = IntervalTimer::new(short_durations());
    assert_eq!(timer.tick(), None);
    assert_eq!(timer.time_left_secs(), 3);

    timer.start();
    timer.tick();
    timer.pause();
    timer.tick();
    assert_eq!(timer.time_left_secs(), 2);
    assert_eq!(timer.format_remaining(), "00:02");

    timer.reset();
    assert_eq!(timer.time_left_secs(), 3);
    assert!(timer.is_paused());
}

// =============================================================================
// Ticker-driven countdown
// =============================================================================

#[tokio::test(start_paused = true)]
async fn ticker_drives_a_full_work_phase() {
    let (tx, mut rx) = mpsc::channel::<Tick>(8);
    let mut ticker = Ticker::new(TickSource::Timer, Duration::from_secs(1), tx);
    let mut timer = IntervalTimer::new(short_durations());

    timer.start();
    ticker.start();
    let started = tokio::time::Instant::now();

    let next = loop {
        let tick = rx.recv().await.unwrap();
        assert!(ticker.accepts(&tick));
        if let Some(next) = timer.tick() {
            ticker.stop();
            break next;
        }
    };

    assert_eq!(next, TimerMode::ShortBreak);
    assert_eq!(started.elapsed(), Duration::from_secs(3));
    assert!(!ticker.is_running());
}

#[tokio::test(start_paused = true)]
async fn restarting_leaves_one_effective_tick_stream() {
    let (tx, mut rx) = mpsc::channel::<Tick>(8);
    let mut ticker = Ticker::new(TickSource::Timer, Duration::from_secs(1), tx);
    let mut timer = IntervalTimer::new(short_durations());
    timer.start();

    ticker.start();
    ticker.start();
    ticker.start();

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let mut applied = 0;
    while let Ok(tick) = rx.try_recv() {
        if ticker.accepts(&tick) {
            timer.tick();
            applied += 1;
        }
    }
    assert_eq!(applied, 2);
    assert_eq!(timer.time_left_secs(), 1);
}

// =============================================================================
// Clock
// =============================================================================

#[test]
fn clock_uses_twelve_hour_format() {
    let t = |h, m, s| NaiveTime::from_hms_opt(h, m, s).unwrap();
    assert_eq!(format_12h(&t(0, 5, 9)), "12:05:09 AM");
    assert_eq!(format_12h(&t(12, 0, 0)), "12:00:00 PM");
    assert_eq!(format_12h(&t(13, 0, 0)), "01:00:00 PM");
    assert_eq!(format_12h(&t(23, 59, 59)), "11:59:59 PM");
}
