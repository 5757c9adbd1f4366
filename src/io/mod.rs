// Purpose - external interfaces: pitch conversion and the output device

pub mod converter;
pub mod playback;

use crate::{
    engine::EngineConfig,
    synth::{
        patch::{NoteEvent, SynthState},
        render_note,
    },
};

/// Play a finished buffer, logging device failures instead of returning them.
pub fn play_buffer(buffer: Vec<f32>, config: &EngineConfig) {
    if let Err(err) = playback::stream_buffer(buffer, config.playback_grace) {
        tracing::warn!(%err, "note abandoned");
    }
}

/// Render `note` from `state` and play it. Blocks for the note's length.
pub fn play_note(note: i32, state: &SynthState, config: &EngineConfig) {
    let event = NoteEvent::with_duration(note, config.note_length);
    play_buffer(render_note(&event, state), config);
}
