//! Time-indexed storage primitives the sequencers are built on.
//!
//! Both containers blend between neighbouring samples with a
//! [`BlendFns`](crate::blend::BlendFns), so any type with an interpolator
//! (or none at all, for stepped values) can be stored.

/// Fixed-resolution tape addressed by time, with a read cache.
pub mod tape;
/// Clock-stamped history that reads values from the recent past.
pub mod delay;

pub use delay::{Delay, DelayRead};
pub use tape::{ClearMode, Tape};
