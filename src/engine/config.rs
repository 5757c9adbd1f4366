use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::NOTE_LENGTH;

/// Engine-wide knobs that are not part of a sound.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Seconds rendered per key press.
    pub note_length: f64,
    /// Extra time the stream stays open after the note's nominal end.
    pub playback_grace: Duration,
    /// Pending triggers the dispatcher queue holds before dropping new ones.
    pub queue_capacity: usize,
}

impl EngineConfig {
    pub fn note_length(mut self, seconds: f64) -> Self {
        self.note_length = seconds.max(0.0);
        self
    }

    pub fn playback_grace(mut self, grace: Duration) -> Self {
        self.playback_grace = grace;
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            note_length: NOTE_LENGTH,
            playback_grace: Duration::from_millis(100),
            queue_capacity: 64,
        }
    }
}
