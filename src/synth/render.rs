//! Whole-note rendering: parameter snapshot in, playable buffer out.

use crate::dsp::{amplify, mix};

use super::{
    patch::{NoteEvent, SynthState},
    voice::VoiceSynthesizer,
};

/// Render a note from an immutable parameter snapshot.
///
/// Voice 1 always plays. Voice 2 is rendered the same way when enabled and
/// crossfaded in at `state.mix`. The result is peak-normalized.
pub fn render_note(event: &NoteEvent, state: &SynthState) -> Vec<f32> {
    let voice1 = VoiceSynthesizer::new(state.voice1, state.amp_envelope);
    let mut buffer = voice1.generate_and_process(event.frequency, event.duration);

    if let Some(spec) = state.active_voice2() {
        let voice2 = VoiceSynthesizer::new(*spec, state.amp_envelope)
            .generate_and_process(event.frequency, event.duration);
        let balance = crate::clamp(state.mix, 0.0, 1.0) as f32;
        buffer = mix::crossfade(&buffer, &voice2, balance);
    }

    let peak = amplify::peak(&buffer);
    amplify::normalize(&mut buffer);

    tracing::debug!(
        note = event.note,
        frequency = event.frequency,
        samples = buffer.len(),
        peak,
        voice2 = state.voice2_enabled,
        "rendered note"
    );
    buffer
}
