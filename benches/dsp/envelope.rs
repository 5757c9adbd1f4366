//! Benchmarks for ADSR curve generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::dsp::{oscillator::sample_count, Envelope};

use crate::NOTE_LENGTHS;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &seconds in NOTE_LENGTHS {
        let size = sample_count(seconds);

        // all four stages present
        let env = Envelope::adsr(0.01, 0.1, 0.6, 0.2);
        group.bench_with_input(BenchmarkId::new("get_envelope", size), &size, |b, &n| {
            b.iter(|| env.get_envelope(black_box(seconds), Some(n)))
        });

        let signal = vec![0.5f32; size];
        let mut buffer = signal.clone();
        group.bench_with_input(BenchmarkId::new("apply_envelope", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&signal);
                env.apply_envelope(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
