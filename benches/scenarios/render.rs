//! Benchmarks for complete key-press renders.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_mono::{
    dsp::{FilterType, Waveform},
    synth::render_note,
    FilterSpec, NoteEvent, OscillatorSpec, SynthState,
};

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/render");
    let event = NoteEvent::new(45); // A2

    // === FACTORY PATCH ===
    // one saw, swept low-pass, short envelopes
    let factory = SynthState::default();
    group.bench_with_input(BenchmarkId::new("factory", 1), &factory, |b, state| {
        b.iter(|| render_note(black_box(&event), black_box(state)))
    });

    // === SUPERSAW ===
    // both voices with 7-copy unison, the heaviest oscillator load
    let mut supersaw = SynthState::default();
    supersaw.voice1.oscillator = OscillatorSpec::new(Waveform::Sawtooth16, 0.0, 7);
    supersaw.voice2.oscillator = OscillatorSpec::new(Waveform::Sawtooth16, 7.0, 7);
    supersaw.voice2_enabled = true;
    group.bench_with_input(BenchmarkId::new("supersaw", 14), &supersaw, |b, state| {
        b.iter(|| render_note(black_box(&event), black_box(state)))
    });

    // === STEEP BAND-PASS ===
    // static design at Q 10 on both voices
    let mut steep = SynthState::default();
    steep.voice1.filter = FilterSpec::new(FilterType::BandPass, 800.0, 10.0);
    steep.voice2.filter = FilterSpec::new(FilterType::BandPass, 1_600.0, 10.0);
    steep.voice2_enabled = true;
    group.bench_with_input(BenchmarkId::new("bandpass_q10", 2), &steep, |b, state| {
        b.iter(|| render_note(black_box(&event), black_box(state)))
    });

    group.finish();
}
