//! Gain, envelope multiplication and peak normalization.

/*
Signal Multiplication and Normalization
=======================================

Vocabulary
----------

  gain          A multiplier applied to amplitude.
                  gain > 1.0  →  louder
                  gain = 1.0  →  unchanged
                  gain < 1.0  →  quieter

  peak          The largest absolute sample value in a buffer.

  normalize     Scale a whole buffer by 1 / peak so its loudest sample sits
                exactly at full scale (±1.0).


Envelope Control
----------------

An envelope is a control signal in [0, 1]. Multiplying audio by it sample
by sample gives the note its shape:

    Oscillator: [ 0.8, -0.6,  0.9, -0.7, ...]
    Envelope:   [ 0.2,  0.5,  0.8,  1.0, ...]
    Output:     [0.16, -0.3, 0.72, -0.7, ...]


Normalization
-------------

A finished note goes through normalization right before playback:

    peak = max |x[i]|
    x[i] = x[i] / peak        (only when peak > 0)

Whatever the waveform, unison count or mix level, every note leaves the
engine peaking at exactly 1.0. A silent buffer has no peak to scale by and
is passed through untouched. Because the gain is a single scalar, the
shape of the signal (and its spectrum) is unchanged.
*/

/// Multiply a signal by a modulator, writing the result into the signal buffer.
#[inline]
pub fn multiply_in_place(signal: &mut [f32], modulator: &[f32]) {
    debug_assert_eq!(signal.len(), modulator.len());

    for (s, &m) in signal.iter_mut().zip(modulator.iter()) {
        *s *= m;
    }
}

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Largest absolute sample value, 0.0 for an empty buffer.
#[inline]
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

/// Rescale so the peak absolute sample is 1.0. Silence is left unchanged.
pub fn normalize(signal: &mut [f32]) {
    let peak = peak(signal);
    if peak > 0.0 {
        for sample in signal.iter_mut() {
            *sample /= peak;
        }
    }
}
