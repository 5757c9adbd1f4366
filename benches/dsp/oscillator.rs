//! Benchmarks for waveform rendering.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::{oscillator::sample_count, Oscillator, Waveform};

use crate::NOTE_LENGTHS;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &seconds in NOTE_LENGTHS {
        let size = sample_count(seconds);

        // plain shapes, then the widest harmonic stacks
        for waveform in [
            Waveform::Sine,
            Waveform::Square,
            Waveform::Sawtooth,
            Waveform::Square16,
            Waveform::Sawtooth16,
        ] {
            let osc = Oscillator::new(waveform);
            group.bench_with_input(BenchmarkId::new(waveform.name(), size), &seconds, |b, &d| {
                b.iter(|| osc.generate(black_box(440.0), black_box(d)))
            });
        }
    }

    group.finish();
}
