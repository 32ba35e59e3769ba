//! Benchmarks for tape, delay and sequencer playback.
//!
//! Run with: cargo bench
//!
//! Each iteration processes one block of frames, the way a frame loop
//! would drive these types once per update.
//!
//! Benchmark groups:
//!   - primitives/*  Tape and delay reads and writes
//!   - scenarios/*   Record-then-play loops through the stateful sequencer

use criterion::{criterion_group, criterion_main};

mod primitives;
mod scenarios;

/// Frames processed per iteration.
pub const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

criterion_group!(
    benches,
    primitives::bench_tape,
    primitives::bench_delay,
    scenarios::bench_looper,
);
criterion_main!(benches);
