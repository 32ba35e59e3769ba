use std::collections::VecDeque;
use std::time::Duration;

use tracing::trace;

use crate::{
    blend::{Blend, BlendFns, BlendRegistry},
    clock::{Clock, Stopwatch},
    error::TapeError,
};

/// Result of a delayed read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRead<T> {
    pub value: T,
    /// No real data exists at the requested age; `value` is a best-effort
    /// stand-in (the oldest sample, or the default when nothing was submitted).
    pub unavailable: bool,
}

impl<T> DelayRead<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Delays values by a time span, interpolating between submissions.
///
/// Every `submit` is stamped with the clock's current time. Reads ask for
/// the value as it was `age` ago. Samples older than `capacity` are evicted
/// on the next submit.
pub struct Delay<T, C: Clock = Stopwatch> {
    samples: VecDeque<(Duration, T)>,
    capacity: Duration,
    fns: BlendFns<T>,
    clock: C,
}

impl<T: Clone> Delay<T, Stopwatch> {
    /// Delay driven by a freshly started [`Stopwatch`].
    pub fn new(capacity: Duration, fns: BlendFns<T>) -> Self {
        Self::with_clock(capacity, fns, Stopwatch::start_new())
    }

    pub fn from_registry(capacity: Duration, registry: &BlendRegistry) -> Result<Self, TapeError>
    where
        T: 'static,
    {
        Ok(Self::new(capacity, registry.lookup::<T>()?))
    }

    /// Registered functions for `T` if any, otherwise its own [`Blend`] impl.
    pub fn resolved(capacity: Duration, registry: &BlendRegistry) -> Self
    where
        T: Blend + 'static,
    {
        Self::new(capacity, registry.resolve::<T>())
    }

    pub fn blendable(capacity: Duration) -> Self
    where
        T: Blend + 'static,
    {
        Self::new(capacity, BlendFns::of())
    }
}

impl<T: Clone, C: Clock> Delay<T, C> {
    pub fn with_clock(capacity: Duration, fns: BlendFns<T>, clock: C) -> Self {
        Self {
            samples: VecDeque::new(),
            capacity,
            fns,
            clock,
        }
    }

    /// Stamp `value` with the current time, evicting expired samples first.
    pub fn submit(&mut self, value: T) {
        let now = self.clock.elapsed();

        let mut evicted = 0usize;
        while let Some((stamp, _)) = self.samples.front() {
            if now.saturating_sub(*stamp) < self.capacity {
                break;
            }
            self.samples.pop_front();
            evicted += 1;
        }
        if evicted > 0 {
            trace!(evicted, remaining = self.samples.len(), "delay evicted expired samples");
        }

        let value = self.fns.store(value);
        self.samples.push_back((now, value));
    }

    /// The value as it was `age` ago.
    pub fn get_at(&self, age: Duration) -> DelayRead<T> {
        let Some((first_stamp, first)) = self.samples.front() else {
            return DelayRead {
                value: self.fns.default_value().clone(),
                unavailable: true,
            };
        };

        let now = self.clock.elapsed();
        let target = match now.checked_sub(age) {
            Some(target) if target >= *first_stamp => target,
            _ => {
                return DelayRead {
                    value: first.clone(),
                    unavailable: true,
                }
            }
        };

        let available = |value: T| DelayRead {
            value,
            unavailable: false,
        };

        // front exists, so back does too
        let Some((last_stamp, last)) = self.samples.back() else {
            return available(first.clone());
        };
        if age.is_zero() || target >= *last_stamp {
            return available(last.clone());
        }

        // first_stamp <= target < last_stamp, so 1 <= next < len
        let next = self.samples.partition_point(|(stamp, _)| *stamp <= target);
        let (prev_stamp, prev) = &self.samples[next - 1];
        if *prev_stamp == target {
            return available(prev.clone());
        }
        let (next_stamp, later) = &self.samples[next];

        let span = next_stamp.saturating_sub(*prev_stamp).as_secs_f64();
        let remaining = next_stamp.saturating_sub(target).as_secs_f64();
        let p = remaining / span;

        available(self.fns.blend(prev, later, (1.0 - p) as f32))
    }

    /// [`Delay::get_at`] without the availability flag.
    pub fn value_at(&self, age: Duration) -> T {
        self.get_at(age).into_value()
    }

    /// Submit `value`, then read the value from `age` ago.
    pub fn update(&mut self, value: T, age: Duration) -> DelayRead<T> {
        self.submit(value);
        self.get_at(age)
    }

    pub fn capacity(&self) -> Duration {
        self.capacity
    }

    /// Takes effect on the next submit.
    pub fn set_capacity(&mut self, capacity: Duration) {
        self.capacity = capacity;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Stored samples, oldest first, with their timestamps.
    pub fn samples(&self) -> impl Iterator<Item = (Duration, &T)> + '_ {
        self.samples.iter().map(|(stamp, value)| (*stamp, value))
    }

    pub fn default_value(&self) -> &T {
        self.fns.default_value()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}
