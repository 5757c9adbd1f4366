//! Measurements on rendered notes.
//!
//! Used by the front-end's readout and by the regression tests; none of it
//! sits on the render path.

use rustfft::{num_complex::Complex, FftPlanner};

use crate::SAMPLE_RATE;

/// Root-mean-square level, 0.0 for an empty buffer.
pub fn rms(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    let sum: f64 = buffer.iter().map(|&x| (x as f64) * (x as f64)).sum();
    (sum / buffer.len() as f64).sqrt() as f32
}

/// Hann-windowed magnitude spectrum, bins `0 ..= len/2`.
pub fn magnitude_spectrum(buffer: &[f32]) -> Vec<f64> {
    let len = buffer.len();
    if len < 2 {
        return Vec::new();
    }

    let denom = (len - 1) as f64;
    let mut bins: Vec<Complex<f64>> = buffer
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let w = 0.5 * (1.0 - (std::f64::consts::TAU * i as f64 / denom).cos());
            Complex::new(x as f64 * w, 0.0)
        })
        .collect();

    FftPlanner::new().plan_fft_forward(len).process(&mut bins);

    bins.truncate(len / 2 + 1);
    bins.iter().map(|c| c.norm()).collect()
}

/// Frequency in Hz of the strongest spectral peak, refined by parabolic
/// interpolation. `None` for silence or buffers too short to analyse.
pub fn dominant_frequency(buffer: &[f32]) -> Option<f64> {
    let spectrum = magnitude_spectrum(buffer);
    if spectrum.len() < 3 {
        return None;
    }

    // skip DC
    let (peak, &magnitude) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    if magnitude <= f64::EPSILON {
        return None;
    }

    let offset = if peak + 1 < spectrum.len() {
        let (l, c, r) = (spectrum[peak - 1], magnitude, spectrum[peak + 1]);
        let denom = l - 2.0 * c + r;
        if denom.abs() > f64::EPSILON {
            0.5 * (l - r) / denom
        } else {
            0.0
        }
    } else {
        0.0
    };

    let bin_width = SAMPLE_RATE as f64 / buffer.len() as f64;
    Some((peak as f64 + offset) * bin_width)
}

/// Log-spaced spectrum in dB for display: `points` pairs of (Hz, dB)
/// between 20 Hz and `max_hz`.
pub fn display_spectrum(buffer: &[f32], points: usize, max_hz: f64) -> Vec<(f64, f64)> {
    let spectrum = magnitude_spectrum(buffer);
    if spectrum.is_empty() || points == 0 {
        return Vec::new();
    }

    let bin_width = SAMPLE_RATE as f64 / buffer.len() as f64;
    let scale = 2.0 / buffer.len() as f64; // full-scale sine → ~0 dB before windowing loss
    let min_hz = 20.0f64;
    let max_hz = max_hz.max(min_hz * 2.0);
    let ratio = max_hz / min_hz;

    let step = if points > 1 {
        1.0 / (points - 1) as f64
    } else {
        0.0
    };
    let last_bin = spectrum.len() - 1;
    let to_bin = |hz: f64| ((hz / bin_width).round() as usize).min(last_bin);

    // each point reports the loudest bin between its neighbours' midpoints
    (0..points)
        .map(|i| {
            let t = i as f64 * step;
            let hz = min_hz * ratio.powf(t);
            let lo = to_bin(min_hz * ratio.powf(t - step / 2.0));
            let hi = to_bin(min_hz * ratio.powf(t + step / 2.0)).max(lo);
            let magnitude = spectrum[lo..=hi].iter().fold(0.0f64, |acc, &m| acc.max(m));
            let db = 20.0 * (magnitude * scale).max(1e-6).log10();
            (hz, db)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::{Oscillator, Waveform};

    #[test]
    fn rms_of_known_signals() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(rms(&[0.5; 64]), 0.5);
        assert!((rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn finds_the_pitch_of_a_sine() {
        for freq in [110.0, 440.0, 1_234.0] {
            let buffer = Oscillator::new(Waveform::Sine).generate(freq, 0.5);
            let found = dominant_frequency(&buffer).unwrap();
            assert!((found - freq).abs() < 2.0, "{freq} Hz detected as {found}");
        }
    }

    #[test]
    fn silence_has_no_pitch() {
        assert!(dominant_frequency(&[0.0; 1_024]).is_none());
        assert!(dominant_frequency(&[]).is_none());
    }

    #[test]
    fn display_spectrum_is_log_spaced() {
        let buffer = Oscillator::new(Waveform::Sine).generate(1_000.0, 0.1);
        let points = display_spectrum(&buffer, 32, 20_000.0);
        assert_eq!(points.len(), 32);
        assert!((points[0].0 - 20.0).abs() < 1e-9);
        assert!((points[31].0 - 20_000.0).abs() < 1e-6);

        let loudest = points
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap();
        assert!(loudest.0 > 700.0 && loudest.0 < 1_400.0);
    }
}
