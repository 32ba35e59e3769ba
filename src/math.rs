//! Scalar helpers shared by the tape, delay and sequencer.

/*
Mapping Modes
=============

`ratio` is the inverse of `lerp`: it tells you where `input` sits between
`start` and `end`, as a fraction. The mode decides what happens once the
input leaves that range.

    Float   0 ─────── 1 ───────→   keeps going (1.5 stays 1.5)
    Clamp   0 ─────── 1 ━━━━━━━    pinned to the edges
    Wrap    0 ──╱ 0 ──╱ 0 ──╱      sawtooth, like a modulo
    Mirror  0 ──╱╲──╱╲──╱╲         triangle, bounces off both edges

The sequencer uses Wrap-like `fmod` for regular loops, Mirror for
ping-pong loops, and Float/Clamp to carve out its crossfade window.
*/

/// Out-of-range behaviour for [`ratio`] and [`map`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    Float,
    Clamp,
    Wrap,
    Mirror,
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `input` between `start` and `end` as a fraction.
///
/// A degenerate range (`start == end`) yields 0.
pub fn ratio(input: f64, start: f64, end: f64, mode: MapMode) -> f64 {
    if end == start {
        return 0.0;
    }

    let ratio = (input - start) / (end - start);

    match mode {
        MapMode::Float => ratio,
        MapMode::Clamp => ratio.clamp(0.0, 1.0),
        MapMode::Wrap => ratio - ratio.floor(),
        MapMode::Mirror => {
            // Mirroring twice is a displacement of two ranges, so strip an
            // even number of ranges and fold what is left.
            let mut range_count = ratio.floor() as i64;
            range_count -= range_count & 1;
            let folded = ratio - range_count as f64;
            if folded > 1.0 {
                2.0 - folded
            } else {
                folded
            }
        }
    }
}

/// Linearly transform `input` from one range into another.
#[inline]
pub fn map(input: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64, mode: MapMode) -> f64 {
    lerp(out_min, out_max, ratio(input, in_min, in_max, mode))
}

/// Modulo that always lands in `[0, b)` for positive `b`, negative `a` included.
#[inline]
pub fn fmod(a: f64, b: f64) -> f64 {
    let q = a / b;
    (q - q.floor()) * b
}
