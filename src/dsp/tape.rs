use tracing::{debug, trace};

use crate::{
    blend::{Blend, BlendFns, BlendRegistry},
    config::TapeConfig,
    error::TapeError,
    math::{ratio, MapMode},
};

/*
Tape: Time-Indexed Sample Buffer
================================

A tape stores values against time at a fixed resolution, and can answer
"what was the value at time t?" for any t, even between or around the
times that were actually written.

Vocabulary
----------

  resolution  Slots per unit of time. At resolution 10, time 0.3 lands in
              slot 3 and time 0.34 also lands in slot 3.

  slot        One storage cell. Vacant until something is written there.

  capacity    floor(max_time * resolution) + 1 slots, allocated once.

  neighbours  The closest written slots below and above a query.

  bridge      A remembered neighbour search stored in a vacant slot, so
              the next query landing there skips the search.


Writing
-------

Writes snap to the nearest slot: round(time * resolution). Anything that
rounds outside the tape is dropped without complaint, except a write that
rounds to exactly `capacity` which is pulled back into the last slot.

  slot:   0    1    2    3    4    5    6    7    8    9   10
          ●    ·    ·    ·    ·    ·    ·    ·    ·    ·    ●
         5.0                                              10.0


Reading
-------

    get(0.0)  →  exact hit on slot 0          → 5.0
    get(0.5)  →  slots 5 and 5 are vacant     → search ↓ finds 0,
                                                search ↑ finds 10,
                                                blend(5.0, 10.0, 0.5) = 7.5
    get(1.9)  →  search ↑ runs off the end    → nearest below, verbatim: 10.0

A tape with a single written slot returns that value for every query. A
tape that has never been written returns the default.

If both searches run off the ends the tape holds nothing reachable: it is
flagged empty again and the default is returned.


Caching
-------

A search can walk across a lot of vacant slots, and playback tends to ask
for the same times over and over. After a search, the vacant slots the
search started from remember which neighbours it found (a bridge). The
next query starting there reads the bridge instead of searching.

The bridge stores neighbour *indices*, not the blended value. Blending is
recomputed from the same inputs every time, so a cached read returns
exactly what the uncached read returned, for any interpolator. Every write
bumps the tape's generation, which retires all existing bridges: a new
sample may sit inside a gap a bridge spans.
*/

/// How [`Tape::clear`] drops its samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearMode {
    /// Overwrite every slot in place, keeping the allocation (realtime-safe).
    #[default]
    Sweep,
    /// Drop the slot buffer and allocate a fresh one.
    Reallocate,
}

/// Upper bound on `max_time * resolution`.
pub const MAX_SLOTS: usize = 1 << 24;

#[derive(Clone)]
enum Slot<T> {
    Vacant,
    Written(T),
    Bridge {
        below: Option<usize>,
        above: Option<usize>,
        generation: u64,
    },
}

/// Fixed-resolution buffer of time-indexed samples with interpolated reads.
pub struct Tape<T> {
    slots: Vec<Slot<T>>,
    max_time: f64,
    resolution: u32,
    empty: bool,
    only_entry: Option<usize>,
    generation: u64,
    fns: BlendFns<T>,
}

impl<T: Clone> Tape<T> {
    pub fn new(max_time: f64, resolution: u32, fns: BlendFns<T>) -> Result<Self, TapeError> {
        if !max_time.is_finite() || max_time < 0.0 {
            return Err(TapeError::InvalidParameter {
                name: "max_time",
                value: max_time,
            });
        }
        if resolution == 0 {
            return Err(TapeError::InvalidParameter {
                name: "resolution",
                value: 0.0,
            });
        }

        if max_time * resolution as f64 >= MAX_SLOTS as f64 {
            return Err(TapeError::InvalidParameter {
                name: "max_time",
                value: max_time,
            });
        }

        let capacity = slot_count(max_time, resolution);

        Ok(Self {
            slots: vec![Slot::Vacant; capacity],
            max_time,
            resolution,
            empty: true,
            only_entry: None,
            generation: 0,
            fns,
        })
    }

    pub fn with_config(config: &TapeConfig, fns: BlendFns<T>) -> Result<Self, TapeError> {
        Self::new(config.max_time, config.resolution, fns)
    }

    /// Build with the functions registered for `T`.
    pub fn from_registry(
        max_time: f64,
        resolution: u32,
        registry: &BlendRegistry,
    ) -> Result<Self, TapeError>
    where
        T: 'static,
    {
        Self::new(max_time, resolution, registry.lookup::<T>()?)
    }

    /// Build with the functions registered for `T`, falling back to its
    /// own [`Blend`] impl.
    pub fn resolved(
        max_time: f64,
        resolution: u32,
        registry: &BlendRegistry,
    ) -> Result<Self, TapeError>
    where
        T: Blend + 'static,
    {
        Self::new(max_time, resolution, registry.resolve::<T>())
    }

    /// Build with `T`'s own [`Blend`] functions.
    pub fn blendable(max_time: f64, resolution: u32) -> Result<Self, TapeError>
    where
        T: Blend + 'static,
    {
        Self::new(max_time, resolution, BlendFns::of())
    }

    /// Write `value` at the slot nearest to `time`.
    ///
    /// Times that round outside the tape are ignored.
    pub fn set(&mut self, time: f64, value: T) {
        let Some(slot) = self.slot_for(time) else {
            trace!(time, max_time = self.max_time, "tape write out of range, dropped");
            return;
        };

        self.slots[slot] = Slot::Written(self.fns.store(value));
        self.generation = self.generation.wrapping_add(1);

        if self.only_entry.is_some_and(|index| index != slot) {
            self.only_entry = None;
        }
        if self.empty {
            self.only_entry = Some(slot);
        }
        self.empty = false;
    }

    /// Value at `time`: exact, interpolated between the nearest written
    /// neighbours, the nearest neighbour at the edges, or the default.
    ///
    /// Takes `&mut self` because searches are cached in the tape.
    pub fn get(&mut self, time: f64) -> T {
        if self.empty {
            return self.fns.default_value().clone();
        }
        if let Some(index) = self.only_entry {
            if let Slot::Written(value) = &self.slots[index] {
                return value.clone();
            }
        }

        let last = self.slots.len() - 1;
        let position = time * self.resolution as f64;
        let abstime = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, last as f64)
        };
        let floor_idx = abstime.floor() as usize;
        let ceil_idx = abstime.ceil() as usize;

        if floor_idx == ceil_idx {
            if let Slot::Written(value) = &self.slots[floor_idx] {
                return value.clone();
            }
        }

        let (below, searched_below) = self.seek_below(floor_idx);
        let (above, searched_above) = self.seek_above(ceil_idx);

        if searched_below || searched_above {
            self.bridge(floor_idx, below, above);
            self.bridge(ceil_idx, below, above);
        }

        match (below, above) {
            (None, None) => {
                debug!("tape has no reachable samples, marking empty");
                self.empty = true;
                self.only_entry = None;
                self.fns.default_value().clone()
            }
            (None, Some(above)) => self.written(above),
            (Some(below), None) => self.written(below),
            (Some(below), Some(above)) => {
                let alpha = ratio(abstime, below as f64, above as f64, MapMode::Clamp) as f32;
                match (&self.slots[below], &self.slots[above]) {
                    (Slot::Written(earlier), Slot::Written(later)) => {
                        self.fns.blend(earlier, later, alpha)
                    }
                    _ => self.fns.default_value().clone(),
                }
            }
        }
    }

    /// Drop every sample.
    pub fn clear(&mut self, mode: ClearMode) {
        trace!(?mode, capacity = self.slots.len(), "clearing tape");
        match mode {
            ClearMode::Sweep => {
                for slot in self.slots.iter_mut() {
                    *slot = Slot::Vacant;
                }
            }
            ClearMode::Reallocate => {
                self.slots = vec![Slot::Vacant; slot_count(self.max_time, self.resolution)];
            }
        }

        self.empty = true;
        self.only_entry = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// True until the first write, and again after a clear.
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Slot index of the only written sample, while there is exactly one.
    pub fn only_entry(&self) -> Option<usize> {
        self.only_entry
    }

    pub fn default_value(&self) -> &T {
        self.fns.default_value()
    }

    pub fn fns(&self) -> &BlendFns<T> {
        &self.fns
    }

    /// Swap the blend functions. Stored samples are kept; later writes go
    /// through the new copy hook.
    pub fn set_fns(&mut self, fns: BlendFns<T>) {
        self.fns = fns;
    }

    fn slot_for(&self, time: f64) -> Option<usize> {
        let position = (time * self.resolution as f64).round();
        if !position.is_finite() || position < 0.0 {
            return None;
        }

        let len = self.slots.len();
        match position as usize {
            index if index == len => Some(len - 1),
            index if index > len => None,
            index => Some(index),
        }
    }

    fn written(&self, index: usize) -> T {
        match &self.slots[index] {
            Slot::Written(value) => value.clone(),
            _ => self.fns.default_value().clone(),
        }
    }

    /// Nearest written slot at or below `from`, and whether a scan was needed.
    fn seek_below(&self, from: usize) -> (Option<usize>, bool) {
        match &self.slots[from] {
            Slot::Written(_) => (Some(from), false),
            Slot::Bridge {
                below, generation, ..
            } if *generation == self.generation => (*below, false),
            _ => {
                let found = (0..from)
                    .rev()
                    .find(|&index| matches!(self.slots[index], Slot::Written(_)));
                (found, true)
            }
        }
    }

    /// Nearest written slot at or above `from`, and whether a scan was needed.
    fn seek_above(&self, from: usize) -> (Option<usize>, bool) {
        match &self.slots[from] {
            Slot::Written(_) => (Some(from), false),
            Slot::Bridge {
                above, generation, ..
            } if *generation == self.generation => (*above, false),
            _ => {
                let found = (from + 1..self.slots.len())
                    .find(|&index| matches!(self.slots[index], Slot::Written(_)));
                (found, true)
            }
        }
    }

    fn bridge(&mut self, index: usize, below: Option<usize>, above: Option<usize>) {
        if matches!(self.slots[index], Slot::Written(_)) {
            return;
        }
        self.slots[index] = Slot::Bridge {
            below,
            above,
            generation: self.generation,
        };
    }
}

fn slot_count(max_time: f64, resolution: u32) -> usize {
    (max_time * resolution as f64).floor() as usize + 1
}
