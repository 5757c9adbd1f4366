use crate::{
    dsp::{
        filter::{clamp_cutoff, DEFAULT_ORDER},
        Envelope, Filter, FilterType, Oscillator,
    },
    io::converter::cents_to_ratio,
    MIN_CUTOFF_HZ,
};

use super::patch::{EnvelopeSpec, VoiceSpec};

/*
Voice chain
===========

    ┌──────────────┐   ┌──────────────────────┐   ┌──────────────┐
    │ unison stack │──▶│ filter (cutoff swept │──▶│ amp envelope │──▶ out
    │ (averaged)   │   │ by filter envelope)  │   │              │
    └──────────────┘   └──────────────────────┘   └──────────────┘

Unison
------

N copies of the oscillator, spread symmetrically across 30 cents around
the voice's own detune:

    detune_i = detune + (i − (N − 1)/2) · 30/(N − 1)        N > 1
    f_i      = f · 2^(detune_i / 1200)

    N = 3, detune 0  →  −15, 0, +15 cents

The copies are averaged, so adding copies thickens the sound without
raising its level. N = 1 is the plain oscillator.

Filter envelope
---------------

The filter envelope is a 0..1 curve scaled into a cutoff sweep that
rises from 20 Hz up to the filter's cutoff:

    cutoff[n] = 20 + curve[n] · (cutoff − 20)

Only a low-pass follows the sweep; the other types run their static design.
*/

/// Total unison spread in cents, edge copy to edge copy.
pub const UNISON_SPREAD_CENTS: f64 = 30.0;

/// Per-copy detune in cents for a unison stack of `count` copies.
pub fn unison_detunes(detune: f64, count: u32) -> Vec<f64> {
    let count = count.max(1);
    if count == 1 {
        return vec![detune];
    }

    let n = count as f64;
    let step = UNISON_SPREAD_CENTS / (n - 1.0);
    (0..count)
        .map(|i| detune + (i as f64 - (n - 1.0) / 2.0) * step)
        .collect()
}

/// Renders one voice of a note: unison oscillators, filter, amp envelope.
#[derive(Debug, Clone, Copy)]
pub struct VoiceSynthesizer {
    voice: VoiceSpec,
    amp_envelope: EnvelopeSpec,
}

impl VoiceSynthesizer {
    pub fn new(voice: VoiceSpec, amp_envelope: EnvelopeSpec) -> Self {
        Self { voice, amp_envelope }
    }

    pub fn generate_and_process(&self, frequency: f64, duration: f64) -> Vec<f32> {
        let mut wave = self.unison(frequency, duration);

        let filter = Filter::from(self.voice.filter);
        let sweep = (filter.filter_type() == FilterType::LowPass)
            .then(|| self.cutoff_sweep(duration, wave.len()));
        filter.apply(&mut wave, DEFAULT_ORDER, sweep.as_deref());

        Envelope::from(self.amp_envelope).apply_envelope(&mut wave);
        wave
    }

    /// Averaged stack of detuned oscillator copies.
    fn unison(&self, frequency: f64, duration: f64) -> Vec<f32> {
        let osc = self.voice.oscillator;
        let oscillator = Oscillator::new(osc.waveform);
        let detunes = unison_detunes(osc.detune_cents, osc.unison_count());

        let mut copies = detunes
            .iter()
            .map(|&cents| oscillator.generate(frequency * cents_to_ratio(cents), duration));

        let Some(mut mixed) = copies.next() else {
            return Vec::new();
        };
        if detunes.len() == 1 {
            return mixed;
        }

        for copy in copies {
            for (acc, s) in mixed.iter_mut().zip(copy) {
                *acc += s;
            }
        }
        let scale = 1.0 / detunes.len() as f32;
        for sample in mixed.iter_mut() {
            *sample *= scale;
        }
        mixed
    }

    /// Filter envelope mapped into a per-sample cutoff curve in Hz.
    fn cutoff_sweep(&self, duration: f64, len: usize) -> Vec<f32> {
        let cutoff = clamp_cutoff(self.voice.filter.cutoff);
        let range = cutoff - MIN_CUTOFF_HZ;

        Envelope::from(self.voice.filter_envelope)
            .get_envelope(duration, Some(len))
            .into_iter()
            .map(|level| (MIN_CUTOFF_HZ + level as f64 * range) as f32)
            .collect()
    }
}
