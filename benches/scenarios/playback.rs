//! Benchmarks for the device callback's block copy.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::io::playback::{BlockStatus, PlaybackCursor};

use crate::BLOCK_SIZES;

pub fn bench_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/playback");
    let note = vec![0.25f32; 22_050];

    for &size in BLOCK_SIZES {
        let mut block = vec![0.0f32; size];

        // drain a whole standard note block by block
        group.bench_with_input(BenchmarkId::new("drain_note", size), &size, |b, _| {
            b.iter(|| {
                let mut cursor = PlaybackCursor::new(note.clone());
                while cursor.fill_block(black_box(&mut block)) == BlockStatus::Playing {}
            })
        });

        let mut stereo = vec![0.0f32; size * 2];
        group.bench_with_input(BenchmarkId::new("drain_note_stereo", size), &size, |b, _| {
            b.iter(|| {
                let mut cursor = PlaybackCursor::new(note.clone());
                while cursor.fill_interleaved(black_box(&mut stereo), 2) == BlockStatus::Playing {}
            })
        });
    }

    group.finish();
}
