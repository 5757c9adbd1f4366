use crate::{synth::patch::EnvelopeSpec, SAMPLE_RATE};

use super::amplify::multiply_in_place;

/*
ADSR Envelope (whole-note renderer)
===================================

A note in this engine has a fixed length that is known before a single
sample is produced, so the envelope is not a gate-driven state machine:
it is a curve of exactly `total` samples laid out up front.

Segment budget
--------------

Each stage's length is converted from seconds to samples (truncating),
then clamped against whatever budget the earlier stages left over:

  attack_n  = min(attack  · sr, total)
  decay_n   = min(decay   · sr, total − attack_n)
  release_n = min(release · sr, total − attack_n − decay_n)
  sustain_n = total − attack_n − decay_n − release_n

Release is reserved BEFORE sustain, so a short note keeps its tail and
loses its sustain first. The four lengths always add up to `total`.

The Shape
---------

  Level
    1.0 ┐   ╱╲
        │  ╱  ╲
    S   │ ╱    ╲__________
        │╱                ╲
    0.0 └──────────────────╲──→ samples
         attack  decay  sustain  release

Ramps include both endpoints: a 4-sample attack is [0, ⅓, ⅔, 1]. Each stage
starts from the value the previous stage actually wrote, so a note that
skips attack decays from 1.0 and a note with nothing before its release
falls from the sustain level.
*/

/// Segment lengths of one envelope, in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments {
    pub attack: usize,
    pub decay: usize,
    pub sustain: usize,
    pub release: usize,
}

impl Segments {
    pub fn total(&self) -> usize {
        self.attack + self.decay + self.sustain + self.release
    }
}

/// Linear ADSR curve generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    attack_time: f64,   // seconds to ramp 0 → 1
    decay_time: f64,    // seconds to ramp peak → sustain
    sustain_level: f64, // level held between decay and release
    release_time: f64,  // seconds to ramp down to 0
}

impl Envelope {
    pub fn adsr(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack_time: attack.max(0.0),
            decay_time: decay.max(0.0),
            sustain_level: crate::clamp(sustain, 0.0, 1.0),
            release_time: release.max(0.0),
        }
    }

    pub fn sustain_level(&self) -> f64 {
        self.sustain_level
    }

    /// Split `total` samples into the four stages.
    pub fn segments(&self, total: usize) -> Segments {
        let attack = seconds_to_samples(self.attack_time).min(total);
        let decay = seconds_to_samples(self.decay_time).min(total - attack);
        let release = seconds_to_samples(self.release_time).min(total - attack - decay);
        let sustain = total - attack - decay - release;

        Segments {
            attack,
            decay,
            sustain,
            release,
        }
    }

    /// Build the curve for a note. `total_samples` defaults to
    /// `duration · sample_rate` (truncated, never negative).
    pub fn get_envelope(&self, duration: f64, total_samples: Option<usize>) -> Vec<f32> {
        let total = total_samples.unwrap_or_else(|| seconds_to_samples(duration));
        let segments = self.segments(total);

        let mut envelope = vec![0.0f32; total];
        let mut idx = 0;

        if segments.attack > 0 {
            linspace(&mut envelope[idx..idx + segments.attack], 0.0, 1.0);
            idx += segments.attack;
        }

        if segments.decay > 0 {
            let start = if idx > 0 { envelope[idx - 1] as f64 } else { 1.0 };
            linspace(
                &mut envelope[idx..idx + segments.decay],
                start,
                self.sustain_level,
            );
            idx += segments.decay;
        }

        if segments.sustain > 0 {
            envelope[idx..idx + segments.sustain].fill(self.sustain_level as f32);
            idx += segments.sustain;
        }

        if segments.release > 0 {
            let start = if idx > 0 {
                envelope[idx - 1] as f64
            } else {
                self.sustain_level
            };
            linspace(&mut envelope[idx..idx + segments.release], start, 0.0);
            idx += segments.release;
        }

        // Stages fill the budget exactly; anything past idx stays at zero.
        debug_assert_eq!(idx, total);
        envelope
    }

    /// Multiply `wave` in place by an envelope of the same length.
    pub fn apply_envelope(&self, wave: &mut [f32]) {
        let envelope = self.get_envelope(0.0, Some(wave.len()));
        multiply_in_place(wave, &envelope);
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::adsr(0.0, 0.1, 0.0, 0.1)
    }
}

impl From<EnvelopeSpec> for Envelope {
    fn from(spec: EnvelopeSpec) -> Self {
        Self::adsr(spec.attack, spec.decay, spec.sustain, spec.release)
    }
}

#[inline]
fn seconds_to_samples(seconds: f64) -> usize {
    // saturating cast: negative and NaN become 0
    (seconds * SAMPLE_RATE as f64).max(0.0) as usize
}

/// Fill `out` with an evenly spaced ramp from `start` to `end`, both included.
fn linspace(out: &mut [f32], start: f64, end: f64) {
    let n = out.len();
    match n {
        0 => {}
        1 => out[0] = start as f32,
        _ => {
            let step = (end - start) / (n - 1) as f64;
            for (i, sample) in out.iter_mut().enumerate() {
                *sample = (start + step * i as f64) as f32;
            }
            out[n - 1] = end as f32;
        }
    }
}
