//! Record values against time and play them back: an interpolating tape,
//! a clock-driven delay and a looping sequencer built on top of them.

pub mod blend;
pub mod clock;
pub mod config;
pub mod dsp; // Tape and delay storage
pub mod error;
pub mod math;
pub mod sequencing; // Loop recording and playback

pub use blend::{Blend, BlendFns, BlendRegistry};
pub use clock::{Clock, ManualClock, Stopwatch};
pub use config::{PlaybackSettings, TapeConfig};
pub use dsp::{ClearMode, Delay, DelayRead, Tape};
pub use error::TapeError;
pub use sequencing::{Sequencer, SequencerState, StatefulSequencer};
