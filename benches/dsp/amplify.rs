//! Benchmarks for gain, envelope multiplication and normalization.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::{amplify, oscillator::sample_count};

use crate::NOTE_LENGTHS;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &seconds in NOTE_LENGTHS {
        let size = sample_count(seconds);
        let signal: Vec<f32> = (0..size)
            .map(|i| ((i as f32 / size as f32) * 2.0 - 1.0) * 0.3)
            .collect();
        let modulator: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();

        let mut signal_copy = signal.clone();
        group.bench_with_input(
            BenchmarkId::new("multiply_in_place", size),
            &size,
            |b, _| {
                b.iter(|| {
                    signal_copy.copy_from_slice(&signal);
                    amplify::multiply_in_place(black_box(&mut signal_copy), black_box(&modulator))
                })
            },
        );

        let mut signal_copy = signal.clone();
        group.bench_with_input(BenchmarkId::new("normalize", size), &size, |b, _| {
            b.iter(|| {
                signal_copy.copy_from_slice(&signal);
                amplify::normalize(black_box(&mut signal_copy))
            })
        });
    }

    group.finish();
}
