//! Two-voice crossfading.

/*
Linear Crossfade
================

  balance = 0.0  →  100% voice 1
  balance = 0.5  →  50% / 50%
  balance = 1.0  →  100% voice 2

    output = (A × (1 − balance)) + (B × balance)

The weights sum to 1.0, so two full-scale voices never sum past full scale.
The ends of the range are exact: at balance 0 the output is A bit-for-bit,
at balance 1 it is B.

Length mismatch
---------------

Both voices of a note are rendered from the same duration, so their lengths
normally agree. When they don't, both are truncated to the shorter one
before mixing; nothing is padded.
*/

/// Crossfade two voices. The result has the length of the shorter input.
pub fn crossfade(a: &[f32], b: &[f32], balance: f32) -> Vec<f32> {
    let len = a.len().min(b.len());
    let mut out = a[..len].to_vec();
    mix_in_place(&mut out, &b[..len], balance);
    out
}

/// Mix signal B into signal A in-place using linear crossfade.
///
/// a = (A × (1-balance)) + (B × balance)
#[inline]
pub fn mix_in_place(a: &mut [f32], b: &[f32], balance: f32) {
    debug_assert_eq!(a.len(), b.len());

    let balance = balance.clamp(0.0, 1.0);
    let weight_a = 1.0 - balance;
    let weight_b = balance;

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa = (*sa * weight_a) + (sb * weight_b);
    }
}
