//! Parameter snapshot types.
//!
//! A [`SynthState`] is captured by value when a key is pressed and handed to
//! the renderer; edits made afterwards never reach a note that is already
//! rendering. Fields are public so a control surface can edit them freely.
//! The renderer clamps them again at the point of use, so an out-of-range
//! value is never an error.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dsp::{FilterType, Waveform},
    io::converter::note_to_freq,
    NOTE_LENGTH,
};

/// Highest unison copy count per voice.
pub const MAX_UNISON: u32 = 7;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OscillatorSpec {
    pub waveform: Waveform,
    pub detune_cents: f64,
    pub unison: u32, // 1..=7
}

impl OscillatorSpec {
    pub fn new(waveform: Waveform, detune_cents: f64, unison: u32) -> Self {
        Self {
            waveform,
            detune_cents,
            unison: unison.clamp(1, MAX_UNISON),
        }
    }

    /// Unison count clamped into `1..=7`.
    pub fn unison_count(&self) -> u32 {
        self.unison.clamp(1, MAX_UNISON)
    }
}

impl Default for OscillatorSpec {
    fn default() -> Self {
        Self::new(Waveform::Sawtooth, 0.0, 1)
    }
}

/// Attack, decay and release in seconds; sustain as a level in `[0, 1]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeSpec {
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl EnvelopeSpec {
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: crate::clamp(sustain, 0.0, 1.0),
            release: release.max(0.0),
        }
    }
}

impl Default for EnvelopeSpec {
    fn default() -> Self {
        Self::new(0.0, 0.1, 0.0, 0.1)
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub filter_type: FilterType,
    pub cutoff: f64,    // Hz
    pub resonance: f64, // Q, >= 1
}

impl FilterSpec {
    pub fn new(filter_type: FilterType, cutoff: f64, resonance: f64) -> Self {
        Self {
            filter_type,
            cutoff: crate::dsp::filter::clamp_cutoff(cutoff),
            resonance: resonance.max(1.0),
        }
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::new(FilterType::LowPass, 2_000.0, 1.0)
    }
}

/// One oscillator with its own filter and filter envelope.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VoiceSpec {
    pub oscillator: OscillatorSpec,
    pub filter: FilterSpec,
    pub filter_envelope: EnvelopeSpec,
}

/// Everything needed to render a note.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthState {
    pub voice1: VoiceSpec,
    pub voice2: VoiceSpec,
    pub voice2_enabled: bool,
    pub amp_envelope: EnvelopeSpec,
    /// Voice 2 level in the crossfade: 0.0 is all voice 1, 1.0 all voice 2.
    pub mix: f64,
}

impl SynthState {
    pub fn with_mix(mut self, mix: f64) -> Self {
        self.mix = crate::clamp(mix, 0.0, 1.0);
        self
    }

    /// Voice 2, if it takes part in the note.
    pub fn active_voice2(&self) -> Option<&VoiceSpec> {
        self.voice2_enabled.then_some(&self.voice2)
    }
}

impl Default for SynthState {
    fn default() -> Self {
        Self {
            voice1: VoiceSpec {
                oscillator: OscillatorSpec::default(),
                filter: FilterSpec::default(),
                filter_envelope: EnvelopeSpec::new(0.0, 0.25, 0.0, 0.13),
            },
            voice2: VoiceSpec {
                oscillator: OscillatorSpec::default(),
                filter: FilterSpec::default(),
                filter_envelope: EnvelopeSpec::new(0.0, 0.1, 0.0, 0.1),
            },
            voice2_enabled: false,
            amp_envelope: EnvelopeSpec::default(),
            mix: 0.5,
        }
    }
}

/// A single key press.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteEvent {
    pub note: i32,
    pub frequency: f64,
    pub duration: f64,
}

impl NoteEvent {
    /// A note of the standard length at equal-temperament pitch.
    pub fn new(note: i32) -> Self {
        Self::with_duration(note, NOTE_LENGTH)
    }

    pub fn with_duration(note: i32, duration: f64) -> Self {
        Self {
            note,
            frequency: note_to_freq(note),
            duration: duration.max(0.0),
        }
    }
}
