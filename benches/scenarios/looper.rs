//! Benchmarks for recording and looping a take.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use nalgebra::UnitQuaternion;
use timetape::{BlendRegistry, PlaybackSettings, Sequencer, StatefulSequencer};

use crate::BLOCK_SIZES;

const FRAME: f64 = 1.0 / 60.0;

fn recorded<T: Clone + 'static>(
    registry: &BlendRegistry,
    settings: PlaybackSettings,
    sample: impl Fn(usize) -> T,
) -> StatefulSequencer<T> {
    let sequencer = Sequencer::from_registry(10.0, 60, registry).unwrap();
    let mut looper = StatefulSequencer::with_settings(sequencer, settings);
    looper.set_recording(true);
    for frame in 0..240 {
        looper.update(sample(frame), frame as f64 * FRAME);
    }
    looper.set_recording(false);
    looper.set_playing(true);
    looper
}

pub fn bench_looper(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/looper");
    let registry = BlendRegistry::with_defaults();

    for &size in BLOCK_SIZES {
        let mut plain = recorded(&registry, PlaybackSettings::default(), |f| (f as f32 * 0.1).sin());
        group.bench_with_input(BenchmarkId::new("play_f32", size), &size, |b, _| {
            let mut time = 4.0;
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..size {
                    time += FRAME;
                    sum += plain.update(0.0, black_box(time));
                }
                sum
            })
        });

        let crossfaded = PlaybackSettings {
            overlap: 0.25,
            ..PlaybackSettings::default()
        };
        let mut rotations = recorded(&registry, crossfaded, |f| {
            UnitQuaternion::from_euler_angles(0.0, f as f32 * 0.05, 0.0)
        });
        group.bench_with_input(BenchmarkId::new("play_rotation_overlap", size), &size, |b, _| {
            let mut time = 4.0;
            b.iter(|| {
                for _ in 0..size {
                    time += FRAME;
                    black_box(rotations.update(UnitQuaternion::identity(), black_box(time)));
                }
            })
        });
    }

    group.finish();
}
