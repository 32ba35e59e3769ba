//! Benchmarks for delay submission and history reads.

use std::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion};
use timetape::{BlendRegistry, Delay, ManualClock};

use crate::BLOCK_SIZES;

const FRAME: Duration = Duration::from_micros(16_667);

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives/delay");
    let registry = BlendRegistry::with_defaults();

    // history lengths in frames
    let depths: &[u32] = &[60, 600];

    for &size in BLOCK_SIZES {
        for &depth in depths {
            let fns = registry.lookup::<f32>().unwrap();
            let mut delay = Delay::with_clock(FRAME * depth, fns, ManualClock::new());
            for i in 0..depth {
                delay.clock_mut().advance(FRAME);
                delay.submit(i as f32);
            }

            group.bench_with_input(
                BenchmarkId::new(format!("update_{depth}_frames"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        let mut sum = 0.0f32;
                        for i in 0..size {
                            delay.clock_mut().advance(FRAME);
                            let age = FRAME * (depth / 2) + Duration::from_micros(i as u64 % 1000);
                            sum += delay.update(black_box(i as f32), black_box(age)).value;
                        }
                        sum
                    })
                },
            );
        }
    }

    group.finish();
}
