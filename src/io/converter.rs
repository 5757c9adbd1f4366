const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Equal-tempered pitch of a note index, A4 (69) = 440 Hz. Any integer is accepted.
pub fn note_to_freq(note: i32) -> f64 {
    440.0 * 2.0_f64.powf((note as f64 - 69.0) / 12.0)
}

/// Frequency ratio of a detune in cents (1200 cents per octave).
pub fn cents_to_ratio(cents: f64) -> f64 {
    2.0_f64.powf(cents / 1200.0)
}

/// Scientific pitch name, `60` → `"C4"`.
pub fn note_name(note: i32) -> String {
    let pitch = NOTE_NAMES[note.rem_euclid(12) as usize];
    let octave = note.div_euclid(12) - 1;
    format!("{pitch}{octave}")
}
