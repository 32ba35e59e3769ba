//! Benchmarks for tape writes and interpolated reads.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use nalgebra::Vector3;
use timetape::{BlendRegistry, Tape};

use crate::BLOCK_SIZES;

pub fn bench_tape(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives/tape");
    let registry = BlendRegistry::with_defaults();

    for &size in BLOCK_SIZES {
        let times: Vec<f64> = (0..size).map(|i| i as f64 * 10.0 / size as f64).collect();

        let mut tape = Tape::<f32>::from_registry(10.0, 60, &registry).unwrap();
        group.bench_with_input(BenchmarkId::new("set", size), &size, |b, _| {
            b.iter(|| {
                for &t in &times {
                    tape.set(black_box(t), t as f32);
                }
            })
        });

        // sparse tape: every read between writes has to seek
        let mut sparse = Tape::<f32>::from_registry(10.0, 60, &registry).unwrap();
        for i in 0..10 {
            sparse.set(i as f64, i as f32);
        }
        let offsets: Vec<f64> = (0..size).map(|i| (i as f64 * 0.37) % 10.0).collect();
        group.bench_with_input(BenchmarkId::new("get_sparse", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &t in &offsets {
                    sum += sparse.get(black_box(t));
                }
                sum
            })
        });

        let mut vectors = Tape::<Vector3<f32>>::from_registry(10.0, 60, &registry).unwrap();
        for i in 0..10 {
            vectors.set(i as f64, Vector3::new(i as f32, 0.0, 1.0));
        }
        group.bench_with_input(BenchmarkId::new("get_vector3", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = Vector3::zeros();
                for &t in &offsets {
                    sum += vectors.get(black_box(t));
                }
                sum
            })
        });
    }

    group.finish();
}
