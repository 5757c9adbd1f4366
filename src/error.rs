/// Failures at the audio device boundary.
///
/// The rendering pipeline itself cannot fail; these only come out of
/// [`crate::io::playback::stream_buffer`].
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// No default output device on the host.
    #[error("no audio output device available")]
    NoDevice,

    /// The device refused the stream configuration.
    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    /// The stream was built but could not be started.
    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

/// Why a note trigger was not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// The trigger queue is full; the note is dropped.
    #[error("note queue is full, trigger for note {0} dropped")]
    QueueFull(i32),

    /// The dispatcher thread is gone.
    #[error("note dispatcher has shut down")]
    Disconnected,
}
