//! Construction and playback parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Size and granularity of a [`Tape`](crate::dsp::tape::Tape).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapeConfig {
    /// Longest time offset the tape can hold (default: 10.0)
    pub max_time: f64,

    /// Slots per unit of time (default: 60)
    pub resolution: u32,
}

impl Default for TapeConfig {
    fn default() -> Self {
        Self {
            max_time: 10.0,
            resolution: 60,
        }
    }
}

/// Per-frame playback options of a [`StatefulSequencer`](crate::sequencing::StatefulSequencer).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlaybackSettings {
    /// Bounce back and forth instead of wrapping (default: false)
    pub ping_pong: bool,

    /// Round the recorded duration to whole time units (default: false)
    pub round_duration: bool,

    /// Start playing as soon as recording stops (default: false)
    pub auto_start: bool,

    /// Seek within the loop, 0..1 relative to its duration (default: 0.0)
    pub phase: f64,

    /// Fraction of the loop crossfaded from its end into its start (default: 0.0).
    /// Ignored while ping-ponging.
    pub overlap: f64,
}
