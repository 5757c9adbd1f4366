//! Benchmarks for whole-buffer DSP primitives.

mod amplify;
mod envelope;
mod filter;
mod mix;
mod oscillator;

pub use amplify::bench_amplify;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use mix::bench_mix;
pub use oscillator::bench_oscillator;
