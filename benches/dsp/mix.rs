//! Benchmarks for two-voice crossfading.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::{mix, oscillator::sample_count};

use crate::NOTE_LENGTHS;

pub fn bench_mix(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/mix");

    for &seconds in NOTE_LENGTHS {
        let size = sample_count(seconds);
        let signal_a: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();
        let signal_b: Vec<f32> = (0..size).map(|i| (i as f32 * 0.15).cos()).collect();

        group.bench_with_input(BenchmarkId::new("crossfade", size), &size, |b, _| {
            b.iter(|| mix::crossfade(black_box(&signal_a), black_box(&signal_b), black_box(0.5)))
        });

        let mut buffer_a = signal_a.clone();
        group.bench_with_input(BenchmarkId::new("crossfade_in_place", size), &size, |b, _| {
            b.iter(|| {
                buffer_a.copy_from_slice(&signal_a);
                mix::mix_in_place(black_box(&mut buffer_a), black_box(&signal_b), black_box(0.5));
            })
        });
    }

    group.finish();
}
