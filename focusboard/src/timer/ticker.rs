//! Periodic tick sources.
//!
//! A [`Ticker`] spawns a tokio task that sends a [`Tick`] on a channel once
//! per period. The task never touches application state; the event loop
//! receives ticks and applies them. Restarting or stopping a ticker aborts
//! its task and bumps its generation, so ticks already queued from an
//! earlier run are recognizably stale and at most one tick stream per
//! source is ever honored.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Which periodic concept a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSource {
    /// Wall-clock display refresh.
    Clock,
    /// Interval timer countdown.
    Timer,
}

/// One tick from a [`Ticker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Source ticker.
    pub source: TickSource,
    /// Generation of the ticker run that produced it.
    pub generation: u64,
}

/// Restartable periodic tick producer.
pub struct Ticker {
    source: TickSource,
    period: Duration,
    tx: mpsc::Sender<Tick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl Ticker {
    /// Creates a stopped ticker that will send on `tx`.
    #[must_use]
    pub const fn new(source: TickSource, period: Duration, tx: mpsc::Sender<Tick>) -> Self {
        Self {
            source,
            period,
            tx,
            handle: None,
            generation: 0,
        }
    }

    /// Starts ticking, cancelling any run already in progress.
    ///
    /// The first tick arrives one period from now. Must be called from
    /// within a tokio runtime.
    pub fn start(&mut self) {
        self.cancel();
        self.generation += 1;
        let tick = Tick {
            source: self.source,
            generation: self.generation,
        };
        let period = self.period;
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(tick).await.is_err() {
                    break;
                }
            }
        }));
        tracing::trace!(source = ?self.source, generation = self.generation, "ticker started");
    }

    /// Stops ticking. Ticks already queued become stale.
    pub fn stop(&mut self) {
        if self.cancel() {
            self.generation += 1;
            tracing::trace!(source = ?self.source, "ticker stopped");
        }
    }

    /// Whether a tick task is active.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Current generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether `tick` comes from this ticker's current run.
    #[must_use]
    pub fn accepts(&self, tick: &Tick) -> bool {
        self.is_running() && tick.source == self.source && tick.generation == self.generation
    }

    fn cancel(&mut self) -> bool {
        self.handle.take().is_some_and(|handle| {
            handle.abort();
            true
        })
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
