//! Scenario benchmarks.
//!
//! These drive the stateful sequencer through a full record and playback
//! cycle, as an animation or control loop would.

mod looper;

pub use looper::bench_looper;
