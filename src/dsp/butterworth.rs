use std::f64::consts::PI;

use rustfft::num_complex::Complex64;

/*
Butterworth Design
==================

A Butterworth filter is maximally flat in its passband: no ripple, just a
smooth roll-off that gets steeper with the order (−6 dB/octave per order).
At every band edge the response is exactly −3 dB (gain 1/√2).

Design route (zeros / poles / gain)
-----------------------------------

  1. Analog prototype: N poles evenly spread on the left half of the unit
     circle,  p_k = −exp(iπ(2k − N + 1) / 2N),  no zeros, gain 1.

  2. Pre-warp the normalized edge(s) w (1.0 = Nyquist) so the bilinear
     transform lands them back where they were asked for:

         ω = 4 · tan(π w / 2)          (sample rate fixed at 2)

  3. Analog band transform:
         low-pass   p → p · ω
         high-pass  p → ω / p           (N zeros at s = 0)
         band-pass  p → p·bw/2 ± sqrt((p·bw/2)² − ω₀²)
                    ω₀ = sqrt(ω₁ ω₂), bw = ω₂ − ω₁, doubles the order

  4. Bilinear transform  z = (4 + s) / (4 − s).  Zeros at infinity land on
     z = −1, zeros at s = 0 land on z = +1.

Second-order sections
---------------------

Expanding all poles into one long polynomial goes numerically bad past
order ~8. Instead conjugate pole pairs become individual biquads, run one
after another. The numerators are fixed by the zero layout:

  low-pass   (1 + z⁻¹)²  → [1,  2, 1]
  high-pass  (1 − z⁻¹)²  → [1, −2, 1]
  band-pass  (1 − z⁻²)   → [1,  0, −1]

An odd low/high-pass order leaves one real pole, which becomes a
first-order section. The overall gain is folded into the first section.
*/

/// Which band to design, with edges normalized to Nyquist (0 < w < 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    LowPass(f64),
    HighPass(f64),
    BandPass(f64, f64),
}

/// One biquad in transposed direct form II.
#[derive(Debug, Clone, Copy)]
struct Section {
    b: [f64; 3],
    a: [f64; 3], // a[0] == 1
}

impl Section {
    #[inline]
    fn process(&self, samples: &mut [f64]) {
        let (mut z0, mut z1) = (0.0, 0.0);
        for x in samples.iter_mut() {
            let input = *x;
            let y = self.b[0] * input + z0;
            z0 = self.b[1] * input - self.a[1] * y + z1;
            z1 = self.b[2] * input - self.a[2] * y;
            *x = y;
        }
    }

    /// Magnitude response at normalized frequency `w` (1.0 = Nyquist).
    fn magnitude(&self, w: f64) -> f64 {
        let z1 = Complex64::from_polar(1.0, -PI * w);
        let z2 = z1 * z1;
        let num = self.b[0] + z1 * self.b[1] + z2 * self.b[2];
        let den = self.a[0] + z1 * self.a[1] + z2 * self.a[2];
        (num / den).norm()
    }
}

/// A designed Butterworth filter, ready to run over a buffer.
#[derive(Debug, Clone)]
pub struct Butterworth {
    sections: Vec<Section>,
}

impl Butterworth {
    /// Design an `order`-th order filter (the band-pass ends up with twice
    /// as many poles, as usual).
    pub fn design(order: usize, band: Band) -> Self {
        let order = order.max(1);
        let prototype: Vec<Complex64> = (0..order)
            .map(|k| {
                let m = 2.0 * k as f64 - order as f64 + 1.0;
                -Complex64::from_polar(1.0, PI * m / (2.0 * order as f64))
            })
            .collect();

        // Analog poles plus the per-pole factor that builds up the gain
        // without ever forming a full polynomial.
        let (analog, factor) = match band {
            Band::LowPass(w) => {
                let wo = prewarp(w);
                (prototype.iter().map(|&p| p * wo).collect::<Vec<_>>(), wo)
            }
            Band::HighPass(w) => {
                let wo = prewarp(w);
                (prototype.iter().map(|&p| wo / p).collect(), 4.0)
            }
            Band::BandPass(lo, hi) => {
                let (w1, w2) = (prewarp(lo), prewarp(hi));
                let wo = (w1 * w2).sqrt();
                let bw = w2 - w1;
                let mut poles = Vec::with_capacity(2 * order);
                for &p in &prototype {
                    let scaled = p * (bw / 2.0);
                    let root = (scaled * scaled - wo * wo).sqrt();
                    poles.push(scaled + root);
                    poles.push(scaled - root);
                }
                (poles, (4.0 * bw).sqrt())
            }
        };

        let mut gain = analog
            .iter()
            .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * (factor / (4.0 - p)));
        if let Band::HighPass(_) = band {
            // k · prod(-z) / prod(-p) for the prototype; z is empty
            let prod = prototype
                .iter()
                .fold(Complex64::new(1.0, 0.0), |acc, &p| acc * -p);
            gain /= prod;
        }

        let digital: Vec<Complex64> = analog.iter().map(|&p| (4.0 + p) / (4.0 - p)).collect();
        let mut sections = pair_sections(&digital, band);
        if let Some(first) = sections.first_mut() {
            for coeff in first.b.iter_mut() {
                *coeff *= gain.re;
            }
        }

        Self { sections }
    }

    /// Filter `samples` in place, zero initial conditions.
    pub fn process(&self, samples: &mut [f64]) {
        for section in &self.sections {
            section.process(samples);
        }
    }

    /// Magnitude response at normalized frequency `w` (1.0 = Nyquist).
    pub fn magnitude(&self, w: f64) -> f64 {
        self.sections.iter().map(|s| s.magnitude(w)).product()
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

#[inline]
fn prewarp(w: f64) -> f64 {
    4.0 * (PI * w / 2.0).tan()
}

fn pair_sections(poles: &[Complex64], band: Band) -> Vec<Section> {
    const EPS: f64 = 1e-9;

    let biquad_numerator = match band {
        Band::LowPass(_) => [1.0, 2.0, 1.0],
        Band::HighPass(_) => [1.0, -2.0, 1.0],
        Band::BandPass(..) => [1.0, 0.0, -1.0],
    };

    let mut sections = Vec::with_capacity(poles.len() / 2 + 1);

    // upper half-plane poles stand in for their conjugates
    for p in poles.iter().filter(|p| p.im > EPS) {
        sections.push(Section {
            b: biquad_numerator,
            a: [1.0, -2.0 * p.re, p.norm_sqr()],
        });
    }

    let mut real: Vec<f64> = poles
        .iter()
        .filter(|p| p.im.abs() <= EPS)
        .map(|p| p.re)
        .collect();
    real.sort_by(|a, b| a.total_cmp(b));

    for pair in real.chunks(2) {
        match *pair {
            [p1, p2] => sections.push(Section {
                b: biquad_numerator,
                a: [1.0, -(p1 + p2), p1 * p2],
            }),
            [p] => {
                let b = match band {
                    Band::HighPass(_) => [1.0, -1.0, 0.0],
                    _ => [1.0, 1.0, 0.0],
                };
                sections.push(Section {
                    b,
                    a: [1.0, -p, 0.0],
                });
            }
            _ => {}
        }
    }

    sections
}
