//! Benchmarks for the storage primitives.

mod delay;
mod tape;

pub use delay::bench_delay;
pub use tape::bench_tape;
