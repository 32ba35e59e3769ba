//! Elapsed-time sources for the delay line.
//!
//! The delay never reads the system clock itself; it asks its [`Clock`].
//! [`Stopwatch`] is the realtime choice, [`ManualClock`] is driven by the
//! caller (offline rendering, tests, fixed-step simulations).

use std::time::{Duration, Instant};

/// Monotonic elapsed-time source.
pub trait Clock {
    /// Time elapsed since the clock started.
    fn elapsed(&self) -> Duration;
}

/// Seekable, pausable wall-clock stopwatch.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    /// A stopped stopwatch reading zero.
    pub fn new() -> Self {
        Self {
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn start_new() -> Self {
        let mut watch = Self::new();
        watch.start();
        watch
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    /// Pause, keeping the elapsed time.
    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Jump to `time`. A running stopwatch keeps running from there.
    pub fn set_time(&mut self, time: Duration) {
        self.accumulated = time;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Stopwatch {
    fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started_at) => self.accumulated + started_at.elapsed(),
            None => self.accumulated,
        }
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(now: Duration) -> Self {
        Self { now }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.now += delta;
    }

    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        self.now
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn elapsed(&self) -> Duration {
        (**self).elapsed()
    }
}
