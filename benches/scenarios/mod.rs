//! Real-world scenario benchmarks.
//!
//! Full key-press renders with the patches the front-end ships, plus the
//! device callback's block copy.

mod playback;
mod render;

pub use playback::bench_playback;
pub use render::bench_render;
