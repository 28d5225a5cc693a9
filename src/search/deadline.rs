//! Time control for the search
//!
//! The search never reads the process clock directly. It is handed a
//! [`Deadline`], a clock plus a budget, and polls it cooperatively. Tests
//! inject a [`ManualClock`] to make timeouts deterministic.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of elapsed time since the current search started.
pub trait Clock {
    fn elapsed(&self) -> Duration;
}

/// Wall clock started at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Hand-driven clock.
///
/// Time only moves through [`ManualClock::advance`], or by a fixed `step`
/// every time it is read, which lets a test expire a search after a known
/// number of polls.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
    step: Duration,
}

impl ManualClock {
    /// Clock frozen at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that moves forward by `step` on every read
    pub fn ticking(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    /// Current reading, without ticking
    pub fn now(&self) -> Duration {
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// A clock and the budget it must stay under.
#[derive(Clone, Copy)]
pub struct Deadline<'a> {
    clock: &'a dyn Clock,
    budget: Duration,
}

impl<'a> Deadline<'a> {
    pub fn new(clock: &'a dyn Clock, budget: Duration) -> Self {
        Self { clock, budget }
    }

    /// Budget used up
    #[inline]
    pub fn expired(&self) -> bool {
        self.clock.elapsed() >= self.budget
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    #[inline]
    pub fn budget(&self) -> Duration {
        self.budget
    }
}

impl std::fmt::Debug for Deadline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deadline")
            .field("budget", &self.budget)
            .finish_non_exhaustive()
    }
}
