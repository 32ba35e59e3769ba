use tracing::debug;

use crate::{
    blend::{Blend, BlendFns, BlendRegistry},
    config::TapeConfig,
    dsp::tape::{ClearMode, Tape},
    error::TapeError,
    math::{fmod, map, MapMode},
};

/// Records values against time and plays them back as a loop.
///
/// Recorded times are relative to the start of the take. The loop length
/// is the offset of the latest recorded value, so it can never exceed the
/// backing tape's `max_time`.
pub struct Sequencer<T> {
    tape: Tape<T>,
    record_started_at: f64,
    playback_started_at: f64,
    duration: f64,
}

impl<T: Clone> Sequencer<T> {
    pub fn new(tape: Tape<T>) -> Self {
        Self {
            tape,
            record_started_at: 0.0,
            playback_started_at: 0.0,
            duration: 0.0,
        }
    }

    pub fn with_config(config: &TapeConfig, fns: BlendFns<T>) -> Result<Self, TapeError> {
        Ok(Self::new(Tape::with_config(config, fns)?))
    }

    pub fn from_registry(
        max_time: f64,
        resolution: u32,
        registry: &BlendRegistry,
    ) -> Result<Self, TapeError>
    where
        T: 'static,
    {
        Ok(Self::new(Tape::from_registry(max_time, resolution, registry)?))
    }

    pub fn resolved(
        max_time: f64,
        resolution: u32,
        registry: &BlendRegistry,
    ) -> Result<Self, TapeError>
    where
        T: Blend + 'static,
    {
        Ok(Self::new(Tape::resolved(max_time, resolution, registry)?))
    }

    pub fn blendable(max_time: f64, resolution: u32) -> Result<Self, TapeError>
    where
        T: Blend + 'static,
    {
        Ok(Self::new(Tape::blendable(max_time, resolution)?))
    }

    /// Drop the recording.
    pub fn reset(&mut self) {
        debug!("sequencer reset");
        self.duration = 0.0;
        self.tape.clear(ClearMode::Sweep);
    }

    /// Record `input` at absolute `time`.
    ///
    /// `start` begins a new take at `time`, discarding the previous one.
    /// Values past the tape's `max_time` (or before the take started) are
    /// dropped.
    pub fn record(&mut self, input: T, time: f64, start: bool, round_duration: bool) {
        if start {
            debug!(time, "recording started");
            self.record_started_at = time;
            self.playback_started_at = time;
            self.tape.clear(ClearMode::Sweep);
        }

        let offset = time - self.record_started_at;
        if !(0.0..=self.tape.max_time()).contains(&offset) {
            return;
        }

        self.duration = if round_duration { offset.round() } else { offset };
        self.tape.set(offset, input);
    }

    /// Loop value at absolute `time`.
    ///
    /// - `phase` seeks within the loop, as a fraction of its duration.
    /// - `overlap` crossfades that fraction of the loop's end into its
    ///   start; the rest of the loop is stretched to keep the period, so
    ///   playback runs slightly slower. Ignored with `ping_pong`.
    /// - `ping_pong` bounces between both ends instead of wrapping.
    pub fn play(&mut self, time: f64, phase: f64, start: bool, overlap: f64, ping_pong: bool) -> T {
        if start {
            debug!(time, duration = self.duration, "playback started");
            self.playback_started_at = time;
        }

        let duration = self.duration;
        if duration.is_nan() || duration <= 0.0 {
            return self.tape.get(0.0);
        }

        let elapsed = time - self.record_started_at + duration * phase;
        let looped = if ping_pong {
            map(elapsed, 0.0, duration, 0.0, duration, MapMode::Mirror)
        } else {
            fmod(elapsed, duration)
        };

        let overlap = overlap.clamp(0.0, 1.0);
        if overlap > 0.0 && !ping_pong {
            let window = overlap * duration;
            let trimmed = map(looped, 0.0, duration, window, duration, MapMode::Float);
            let fade_in = map(trimmed, duration - window, duration, 0.0, window, MapMode::Clamp);

            let tail = self.tape.get(trimmed);
            let head = self.tape.get(fade_in);
            return self.tape.fns().blend(&tail, &head, (fade_in / window) as f32);
        }

        self.tape.get(looped)
    }

    /// Length of the recorded loop.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration.clamp(0.0, self.tape.max_time());
    }

    /// Nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.tape.is_empty()
    }

    pub fn record_started_at(&self) -> f64 {
        self.record_started_at
    }

    pub fn playback_started_at(&self) -> f64 {
        self.playback_started_at
    }

    pub fn tape(&self) -> &Tape<T> {
        &self.tape
    }
}
