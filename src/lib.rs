pub mod analysis; // Spectrum / level measurements for rendered notes
pub mod dsp;
pub mod engine; // Per-note dispatch and engine configuration
pub mod error;
pub mod io;
pub mod synth; // Parameter snapshots, voices, note rendering

pub use engine::EngineConfig;
pub use error::PlaybackError;
pub use synth::patch::{EnvelopeSpec, FilterSpec, NoteEvent, OscillatorSpec, SynthState, VoiceSpec};

/// Fixed engine sample rate in Hz. Every buffer the crate produces runs at this rate.
pub const SAMPLE_RATE: u32 = 44_100;

/// Half the sample rate.
pub const NYQUIST: f64 = SAMPLE_RATE as f64 / 2.0;

/// Lowest cutoff any filter is allowed to use.
pub const MIN_CUTOFF_HZ: f64 = 20.0;

/// Highest cutoff any filter is allowed to use (one hertz below Nyquist).
pub const MAX_CUTOFF_HZ: f64 = NYQUIST - 1.0;

/// Length of a triggered note in seconds, independent of how long a key is held.
pub const NOTE_LENGTH: f64 = 0.5;

/// Clamp that never panics when `min > max` (the lower bound wins).
#[inline]
pub(crate) fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(value.min(max))
}
