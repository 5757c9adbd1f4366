use std::{convert::Infallible, f64::consts::TAU, fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SAMPLE_RATE;

/*
Waveforms
=========

Every waveform is evaluated directly from time, not from an accumulated
phase: sample n sits at t = n / sample_rate, and the cycle position is
x = f·t. That keeps long renders drift-free and lets harmonics be computed
from the same x by scaling it (x·n is the n-th harmonic).

  sine(x)     = sin(2π x)
  square(x)   = sign(sin(2π x))           sign(0) = 0
  sawtooth(x) = 2 (x − floor(0.5 + x))    centred, range [-1, 1)

Harmonic stacks
---------------

The "*N" variants add extra partials of the base shape on top of it, each
weighted 1/n, then divide by N to keep the peak in range:

  Square*4     odd harmonics 3, 5, 7, 9          ÷ 4
  Square*8     odd harmonics 3 ..= 15            ÷ 8
  Square*16    odd harmonics 3 ..= 31            ÷ 16
  Sawtooth*4   harmonics 2, 3, 4                 ÷ 4
  Sawtooth*8   harmonics 2 ..= 8                 ÷ 8
  Sawtooth*16  harmonics 2 ..= 16                ÷ 16

Note the partials are themselves squares/saws, not sines, so the stacks
are brighter than their plain counterparts.
*/

/// Oscillator waveform kinds, named the way the control surface shows them.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    Sine,
    Square,
    #[default]
    Sawtooth,
    Square4,
    Square8,
    Square16,
    Sawtooth4,
    Sawtooth8,
    Sawtooth16,
    /// Any unrecognised kind renders as silence.
    Silence,
}

impl Waveform {
    /// Every selectable kind, in menu order.
    pub const ALL: [Waveform; 9] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Square4,
        Waveform::Square8,
        Waveform::Square16,
        Waveform::Sawtooth,
        Waveform::Sawtooth4,
        Waveform::Sawtooth8,
        Waveform::Sawtooth16,
    ];

    /// Parse a display name. Unknown names map to [`Waveform::Silence`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Sine" => Waveform::Sine,
            "Square" => Waveform::Square,
            "Sawtooth" => Waveform::Sawtooth,
            "Square*4" => Waveform::Square4,
            "Square*8" => Waveform::Square8,
            "Square*16" => Waveform::Square16,
            "Sawtooth*4" => Waveform::Sawtooth4,
            "Sawtooth*8" => Waveform::Sawtooth8,
            "Sawtooth*16" => Waveform::Sawtooth16,
            _ => Waveform::Silence,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Square => "Square",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Square4 => "Square*4",
            Waveform::Square8 => "Square*8",
            Waveform::Square16 => "Square*16",
            Waveform::Sawtooth4 => "Sawtooth*4",
            Waveform::Sawtooth8 => "Sawtooth*8",
            Waveform::Sawtooth16 => "Sawtooth*16",
            Waveform::Silence => "Silence",
        }
    }

    /// Next kind in menu order (wraps). Used by the control surface.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|w| *w == self).map_or(0, |i| i + 1);
        Self::ALL[idx % Self::ALL.len()]
    }

    /// Previous kind in menu order (wraps).
    pub fn prev(self) -> Self {
        let len = Self::ALL.len();
        let idx = Self::ALL.iter().position(|w| *w == self).unwrap_or(0);
        Self::ALL[(idx + len - 1) % len]
    }

    /// Value of this waveform at cycle position `x` (= frequency × time).
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        match self {
            Waveform::Sine => sine(x),
            Waveform::Square => square(x),
            Waveform::Sawtooth => sawtooth(x),
            Waveform::Square4 => stack(square, x, (3..=9).step_by(2), 4.0),
            Waveform::Square8 => stack(square, x, (3..=15).step_by(2), 8.0),
            Waveform::Square16 => stack(square, x, (3..=31).step_by(2), 16.0),
            Waveform::Sawtooth4 => stack(sawtooth, x, 2..=4, 4.0),
            Waveform::Sawtooth8 => stack(sawtooth, x, 2..=8, 8.0),
            Waveform::Sawtooth16 => stack(sawtooth, x, 2..=16, 16.0),
            Waveform::Silence => 0.0,
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

#[inline]
fn sine(x: f64) -> f64 {
    (TAU * x).sin()
}

#[inline]
fn square(x: f64) -> f64 {
    let s = (TAU * x).sin();
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
fn sawtooth(x: f64) -> f64 {
    2.0 * (x - (0.5 + x).floor())
}

#[inline]
fn stack(
    base: fn(f64) -> f64,
    x: f64,
    harmonics: impl Iterator<Item = u32>,
    normalization: f64,
) -> f64 {
    let partials: f64 = harmonics
        .map(|n| {
            let n = n as f64;
            base(n * x) / n
        })
        .sum();
    (base(x) + partials) / normalization
}

/// Number of samples spanned by `duration` seconds at the engine rate.
#[inline]
pub fn sample_count(duration: f64) -> usize {
    (SAMPLE_RATE as f64 * duration).round().max(0.0) as usize
}

/// Renders whole buffers of a single waveform.
#[derive(Debug, Clone, Copy)]
pub struct Oscillator {
    waveform: Waveform,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        Self { waveform }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Render `duration` seconds at unit amplitude.
    pub fn generate(&self, frequency: f64, duration: f64) -> Vec<f32> {
        self.generate_with_amplitude(frequency, duration, 1.0)
    }

    /// Render `round(sample_rate * duration)` samples starting at t = 0.
    pub fn generate_with_amplitude(&self, frequency: f64, duration: f64, amplitude: f32) -> Vec<f32> {
        let len = sample_count(duration);
        if self.waveform == Waveform::Silence {
            return vec![0.0; len];
        }

        let amplitude = amplitude as f64;
        let sr = SAMPLE_RATE as f64;
        (0..len)
            .map(|n| {
                let t = n as f64 / sr;
                (amplitude * self.waveform.eval(frequency * t)) as f32
            })
            .collect()
    }
}
