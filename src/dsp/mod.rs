//! Offline DSP primitives used to render one note.
//!
//! Everything here works on whole buffers: a note is rendered completely
//! before it reaches the audio device, so none of these functions run inside
//! the realtime callback.

/// Peak measurement and normalization.
pub mod amplify;
/// Butterworth design (zeros/poles/gain → second-order sections).
pub mod butterworth;
/// Attack/decay/sustain/release curve generator.
pub mod envelope;
/// Static Butterworth and time-varying one-pole filtering.
pub mod filter;
/// Linear crossfade between two voices.
pub mod mix;
/// Waveform synthesis, including harmonic-stacked variants.
pub mod oscillator;

pub use envelope::Envelope;
pub use filter::{Filter, FilterType};
pub use oscillator::{Oscillator, Waveform};
