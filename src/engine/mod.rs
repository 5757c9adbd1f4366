// Purpose: fire-and-forget note dispatch and engine-level settings

pub mod config;
#[cfg(feature = "rtrb")]
pub mod dispatch;

pub use config::EngineConfig;
#[cfg(feature = "rtrb")]
pub use dispatch::{NoteDispatcher, NoteTrigger};
