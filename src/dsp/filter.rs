use std::{convert::Infallible, f64::consts::TAU, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{synth::patch::FilterSpec, MAX_CUTOFF_HZ, MIN_CUTOFF_HZ, NYQUIST, SAMPLE_RATE};

use super::butterworth::{Band, Butterworth};

/*
| type      | passes             | rejects            | design            |
| --------- | ------------------ | ------------------ | ----------------- |
| None      | everything         | nothing            | identity          |
| Low-pass  | below cutoff       | above cutoff       | Butterworth / 1-pole sweep |
| High-pass | above cutoff       | below cutoff       | Butterworth       |
| Band-pass | cutoff .. 1.5·cutoff (widened by 1/Q) | outside | Butterworth |

Resonance scales the ORDER, not a peak
--------------------------------------

There is no resonant bump here. Q multiplies the design order:

    scaled_order = max(1, round(order · Q))

so a higher Q gives a steeper skirt. For the band-pass Q also narrows the
widening applied to the band edges:

    low  = cutoff / nyquist
    high = clamp(1.5 · cutoff, cutoff, nyquist − 1) / nyquist
    pad  = (high − low) / Q / 2
    band = [clamp(low − pad, 0.01, 0.99), clamp(high + pad, band.low, 0.99)]

Swept low-pass
--------------

When a low-pass is handed a per-sample cutoff curve it switches to a
one-pole smoother whose coefficient follows the curve:

    α[n] = 1 − exp(−2π · fc[n] / sr)
    y[0] = x[0]
    y[n] = y[n−1] + α[n] · (x[n] − y[n−1])

The curve is padded with its last value (or truncated) to the buffer's
length and every point is clamped to [20 Hz, nyquist − 1].
*/

/// Default design order before Q scaling.
pub const DEFAULT_ORDER: u32 = 2;

/// Upper bound on the Q-scaled design order.
pub const MAX_FILTER_ORDER: usize = 32;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterType {
    None,
    #[default]
    LowPass,
    HighPass,
    BandPass,
}

impl FilterType {
    pub const ALL: [FilterType; 4] = [
        FilterType::None,
        FilterType::LowPass,
        FilterType::HighPass,
        FilterType::BandPass,
    ];

    /// Parse a display name. Anything unrecognised is [`FilterType::None`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Low-pass" => FilterType::LowPass,
            "High-pass" => FilterType::HighPass,
            "Band-pass" => FilterType::BandPass,
            _ => FilterType::None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FilterType::None => "None",
            FilterType::LowPass => "Low-pass",
            FilterType::HighPass => "High-pass",
            FilterType::BandPass => "Band-pass",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + len - 1) % len]
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

/// Whole-buffer filter: static Butterworth or a cutoff-swept one-pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filter {
    filter_type: FilterType,
    cutoff: f64,    // Hz, clamped at use
    resonance: f64, // Q, >= 1
}

impl Filter {
    pub fn new(filter_type: FilterType, cutoff: f64, resonance: f64) -> Self {
        Self {
            filter_type,
            cutoff,
            resonance: resonance.max(1.0),
        }
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Cutoff clamped into the usable range.
    pub fn cutoff(&self) -> f64 {
        clamp_cutoff(self.cutoff)
    }

    pub fn resonance(&self) -> f64 {
        self.resonance
    }

    /// Q-scaled design order for a base `order`.
    pub fn scaled_order(&self, order: u32) -> usize {
        let scaled = (order as f64 * self.resonance).round().max(1.0) as usize;
        scaled.min(MAX_FILTER_ORDER)
    }

    /// Filter `data` in place.
    ///
    /// A non-empty `cutoff_envelope` (Hz per sample) only has an effect on a
    /// low-pass, where it selects the swept one-pole path. Every other case
    /// runs the static design from zero initial conditions.
    pub fn apply(&self, data: &mut [f32], order: u32, cutoff_envelope: Option<&[f32]>) {
        if self.filter_type == FilterType::None || data.is_empty() {
            return;
        }

        if let (FilterType::LowPass, Some(curve)) = (self.filter_type, cutoff_envelope) {
            if !curve.is_empty() {
                one_pole_sweep(data, curve);
                return;
            }
        }

        let order = self.scaled_order(order);
        let band = match self.filter_type {
            FilterType::LowPass => Band::LowPass(self.cutoff() / NYQUIST),
            FilterType::HighPass => Band::HighPass(self.cutoff() / NYQUIST),
            FilterType::BandPass => match self.band_edges() {
                Some((low, high)) => Band::BandPass(low, high),
                None => {
                    data.fill(0.0);
                    return;
                }
            },
            FilterType::None => return,
        };

        let mut work: Vec<f64> = data.iter().map(|&x| x as f64).collect();
        Butterworth::design(order, band).process(&mut work);
        for (out, y) in data.iter_mut().zip(work) {
            *out = y as f32;
        }
    }

    /// Normalized band-pass edges, or `None` when the band has collapsed.
    pub fn band_edges(&self) -> Option<(f64, f64)> {
        let low_hz = self.cutoff();
        let high_hz = crate::clamp(low_hz * 1.5, low_hz, MAX_CUTOFF_HZ);

        let low = low_hz / NYQUIST;
        let high = high_hz / NYQUIST;
        let pad = (high - low) / self.resonance / 2.0;

        let low_limit = crate::clamp(low - pad, 0.01, 0.99);
        let high_limit = crate::clamp(high + pad, low_limit, 0.99);

        (high_limit > low_limit).then_some((low_limit, high_limit))
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self::new(FilterType::LowPass, 2_000.0, 1.0)
    }
}

impl From<FilterSpec> for Filter {
    fn from(spec: FilterSpec) -> Self {
        Self::new(spec.filter_type, spec.cutoff, spec.resonance)
    }
}

#[inline]
pub(crate) fn clamp_cutoff(hz: f64) -> f64 {
    crate::clamp(hz, MIN_CUTOFF_HZ, MAX_CUTOFF_HZ)
}

fn one_pole_sweep(data: &mut [f32], curve: &[f32]) {
    let sr = SAMPLE_RATE as f64;
    let last = curve[curve.len() - 1];
    let cutoff_at = |n: usize| clamp_cutoff(*curve.get(n).unwrap_or(&last) as f64);

    let mut y = data[0] as f64;
    for (n, sample) in data.iter_mut().enumerate().skip(1) {
        let alpha = 1.0 - (-TAU * cutoff_at(n) / sr).exp();
        y += alpha * (*sample as f64 - y);
        *sample = y as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::oscillator::{Oscillator, Waveform};

    const SETTLE: usize = 4_000;

    fn rms(buffer: &[f32]) -> f32 {
        (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt()
    }

    /// RMS gain of the filter on a sine, measured after the transient.
    fn sine_gain(filter: &Filter, freq: f64) -> f32 {
        let input = Oscillator::new(Waveform::Sine).generate(freq, 0.5);
        let mut output = input.clone();
        filter.apply(&mut output, DEFAULT_ORDER, None);
        rms(&output[SETTLE..]) / rms(&input[SETTLE..])
    }

    #[test]
    fn none_is_identity() {
        let filter = Filter::new(FilterType::None, 500.0, 4.0);
        let input = Oscillator::new(Waveform::Sawtooth).generate(220.0, 0.1);
        let mut output = input.clone();
        filter.apply(&mut output, DEFAULT_ORDER, Some(&[100.0; 8]));
        assert_eq!(output, input);
    }

    #[test]
    fn lowpass_rejects_tone_above_cutoff() {
        let filter = Filter::new(FilterType::LowPass, 500.0, 1.0);
        assert!(sine_gain(&filter, 100.0) > 0.9);
        assert!(sine_gain(&filter, 5_000.0) < 0.05);
    }

    #[test]
    fn highpass_rejects_tone_below_cutoff() {
        let filter = Filter::new(FilterType::HighPass, 2_000.0, 1.0);
        assert!(sine_gain(&filter, 8_000.0) > 0.9);
        assert!(sine_gain(&filter, 200.0) < 0.05);
    }

    #[test]
    fn bandpass_prefers_its_band() {
        let filter = Filter::new(FilterType::BandPass, 1_000.0, 1.0);
        let (low, high) = filter.band_edges().unwrap();
        // 1000..1500 Hz widened by 250 Hz on each side
        assert!((low * NYQUIST - 750.0).abs() < 1e-6);
        assert!((high * NYQUIST - 1_750.0).abs() < 1e-6);

        assert!(sine_gain(&filter, 1_200.0) > 0.7);
        assert!(sine_gain(&filter, 8_000.0) < 0.1);
    }

    #[test]
    fn higher_q_steepens_the_skirt() {
        let gentle = Filter::new(FilterType::LowPass, 1_000.0, 1.0);
        let steep = Filter::new(FilterType::LowPass, 1_000.0, 3.0);
        assert_eq!(steep.scaled_order(DEFAULT_ORDER), 6);
        assert!(sine_gain(&steep, 3_000.0) < sine_gain(&gentle, 3_000.0));
    }

    #[test]
    fn scaled_order_is_bounded() {
        assert_eq!(Filter::new(FilterType::LowPass, 1_000.0, 1.0).scaled_order(0), 1);
        assert_eq!(Filter::new(FilterType::LowPass, 1_000.0, 1.3).scaled_order(2), 3);
        assert_eq!(
            Filter::new(FilterType::LowPass, 1_000.0, 100.0).scaled_order(2),
            MAX_FILTER_ORDER
        );
    }

    #[test]
    fn collapsed_band_is_silent() {
        let filter = Filter::new(FilterType::BandPass, 30_000.0, 1.0);
        assert!(filter.band_edges().is_none());

        let mut data = Oscillator::new(Waveform::Square).generate(440.0, 0.05);
        filter.apply(&mut data, DEFAULT_ORDER, None);
        assert!(data.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn cutoff_is_clamped() {
        assert_eq!(Filter::new(FilterType::LowPass, 1.0, 1.0).cutoff(), MIN_CUTOFF_HZ);
        assert_eq!(Filter::new(FilterType::LowPass, 1e9, 1.0).cutoff(), MAX_CUTOFF_HZ);
        assert_eq!(Filter::new(FilterType::LowPass, 1_000.0, 0.2).resonance(), 1.0);
    }

    #[test]
    fn constant_sweep_matches_one_pole_step_response() {
        let cutoff = 1_000.0f64;
        let alpha = 1.0 - (-TAU * cutoff / SAMPLE_RATE as f64).exp();

        let mut data = vec![1.0f32; 2_000];
        data[0] = 0.0;
        let filter = Filter::new(FilterType::LowPass, 5_000.0, 1.0);
        filter.apply(&mut data, DEFAULT_ORDER, Some(&[cutoff as f32; 2_000]));

        assert_eq!(data[0], 0.0);
        for n in [1, 10, 100] {
            let expected = 1.0 - (1.0 - alpha).powi(n as i32);
            assert!((data[n] as f64 - expected).abs() < 1e-5, "n = {n}");
        }
        assert!((data[1_999] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn constant_sweep_settles_at_one_pole_gain() {
        let cutoff = 500.0f64;
        let freq = 2_000.0f64;
        let alpha = 1.0 - (-TAU * cutoff / SAMPLE_RATE as f64).exp();
        let w = TAU * freq / SAMPLE_RATE as f64;
        // |H(e^jw)| = α / |1 − (1 − α) e^{−jw}|
        let denom = (1.0 - (1.0 - alpha) * w.cos()).hypot((1.0 - alpha) * w.sin());
        let expected = (alpha / denom) as f32;

        let input = Oscillator::new(Waveform::Sine).generate(freq, 0.5);
        let mut output = input.clone();
        let filter = Filter::new(FilterType::LowPass, cutoff, 1.0);
        filter.apply(&mut output, DEFAULT_ORDER, Some(&[cutoff as f32]));

        let measured = rms(&output[SETTLE..]) / rms(&input[SETTLE..]);
        assert!((measured - expected).abs() < 0.01, "{measured} vs {expected}");
    }

    #[test]
    fn short_curve_is_padded_long_curve_truncated() {
        let input = Oscillator::new(Waveform::Sawtooth).generate(110.0, 0.05);
        let filter = Filter::default();
        let full = vec![800.0f32; input.len()];

        let mut reference = input.clone();
        filter.apply(&mut reference, DEFAULT_ORDER, Some(&full));

        let mut padded = input.clone();
        filter.apply(&mut padded, DEFAULT_ORDER, Some(&[800.0]));
        assert_eq!(padded, reference);

        let mut truncated = input.clone();
        let long = vec![800.0f32; input.len() * 2];
        filter.apply(&mut truncated, DEFAULT_ORDER, Some(&long));
        assert_eq!(truncated, reference);
    }

    #[test]
    fn empty_curve_falls_back_to_static_design() {
        let input = Oscillator::new(Waveform::Sawtooth).generate(110.0, 0.05);
        let filter = Filter::default();

        let mut static_path = input.clone();
        filter.apply(&mut static_path, DEFAULT_ORDER, None);

        let mut empty_curve = input.clone();
        filter.apply(&mut empty_curve, DEFAULT_ORDER, Some(&[]));
        assert_eq!(empty_curve, static_path);
    }

    #[test]
    fn sweep_only_applies_to_lowpass() {
        let input = Oscillator::new(Waveform::Sawtooth).generate(110.0, 0.05);
        let filter = Filter::new(FilterType::HighPass, 1_000.0, 1.0);

        let mut with_curve = input.clone();
        filter.apply(&mut with_curve, DEFAULT_ORDER, Some(&[50.0]));
        let mut without = input;
        filter.apply(&mut without, DEFAULT_ORDER, None);
        assert_eq!(with_curve, without);
    }

    #[test]
    fn filter_type_names() {
        for t in FilterType::ALL {
            assert_eq!(FilterType::from_name(t.name()), t);
        }
        assert_eq!("Notch".parse::<FilterType>().unwrap(), FilterType::None);
        assert_eq!(FilterType::BandPass.next(), FilterType::None);
        assert_eq!(FilterType::None.prev(), FilterType::BandPass);
    }
}
