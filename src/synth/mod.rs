// Purpose: parameter snapshots and the per-note render pipeline
// Sits above the DSP primitives; nothing here touches the audio device

pub mod patch;
pub mod render;
pub mod voice;

pub use render::render_note;
pub use voice::VoiceSynthesizer;
