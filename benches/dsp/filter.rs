//! Benchmarks for the Butterworth and swept one-pole filters.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::{
    filter::DEFAULT_ORDER, oscillator::sample_count, Filter, FilterType, Oscillator, Waveform,
};

use crate::NOTE_LENGTHS;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &seconds in NOTE_LENGTHS {
        let size = sample_count(seconds);
        let input = Oscillator::new(Waveform::Sawtooth).generate(110.0, seconds);
        let mut buffer = input.clone();

        for (name, filter) in [
            ("lowpass", Filter::new(FilterType::LowPass, 1_000.0, 1.0)),
            ("highpass", Filter::new(FilterType::HighPass, 1_000.0, 1.0)),
            ("bandpass", Filter::new(FilterType::BandPass, 1_000.0, 1.0)),
            // Q 10 → order 20, the steepest the knobs reach
            ("lowpass_q10", Filter::new(FilterType::LowPass, 1_000.0, 10.0)),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.apply(black_box(&mut buffer), DEFAULT_ORDER, None);
                })
            });
        }

        // cutoff sweep from 2 kHz down to 20 Hz
        let sweep: Vec<f32> = (0..size)
            .map(|i| 2_000.0 - 1_980.0 * i as f32 / size as f32)
            .collect();
        let filter = Filter::new(FilterType::LowPass, 2_000.0, 1.0);
        group.bench_with_input(BenchmarkId::new("lowpass_swept", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                filter.apply(black_box(&mut buffer), DEFAULT_ORDER, Some(&sweep));
            })
        });
    }

    group.finish();
}
