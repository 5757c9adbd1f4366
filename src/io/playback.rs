use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread,
    time::Duration,
};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::{error::PlaybackError, SAMPLE_RATE};

/*
Block-pull playback
===================

The device asks for audio in blocks whose size it picks. A finished note
is already a complete buffer, so the callback only has to copy:

    buffer:   [■■■■■■■■■■■■■■■■■■■■■■■■■■■]
    blocks:   [  512  ][  512  ][  512  ][ 91 + zeros ]
                                          ↑ completion

  - each block takes buffer[cursor .. min(cursor + frames, len)]
  - a short final block is zero-filled
  - completion is raised once the cursor reaches len
  - blocks requested after completion are pure silence

The thread that opened the stream does not wait on the flag. It sleeps for
the nominal note length plus a grace period and then drops the stream.
*/

/// Outcome of filling one device block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStatus {
    Playing,
    Complete,
}

/// Read position into a rendered note, shared with a completion flag.
#[derive(Debug)]
pub struct PlaybackCursor {
    buffer: Vec<f32>,
    position: usize,
    complete: Arc<AtomicBool>,
}

impl PlaybackCursor {
    pub fn new(buffer: Vec<f32>) -> Self {
        Self {
            buffer,
            position: 0,
            complete: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that flips to `true` once the last sample has been handed out.
    pub fn completion_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.complete)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.complete.load(Ordering::Acquire)
    }

    /// Fill a mono block.
    pub fn fill_block(&mut self, out: &mut [f32]) -> BlockStatus {
        let end = (self.position + out.len()).min(self.buffer.len());
        let count = end - self.position;

        out[..count].copy_from_slice(&self.buffer[self.position..end]);
        out[count..].fill(0.0);
        self.position = end;

        if self.position >= self.buffer.len() {
            self.complete.store(true, Ordering::Release);
            BlockStatus::Complete
        } else {
            BlockStatus::Playing
        }
    }

    /// Fill an interleaved block, copying the mono signal to every channel.
    pub fn fill_interleaved(&mut self, data: &mut [f32], channels: usize) -> BlockStatus {
        let channels = channels.max(1);
        if channels == 1 {
            return self.fill_block(data);
        }

        let frames = data.len() / channels;
        let start = self.position;
        let end = (start + frames).min(self.buffer.len());

        for (frame, out) in data.chunks_mut(channels).enumerate() {
            let sample = if start + frame < end {
                self.buffer[start + frame]
            } else {
                0.0
            };
            out.fill(sample);
        }
        self.position = end;

        if self.position >= self.buffer.len() {
            self.complete.store(true, Ordering::Release);
            BlockStatus::Complete
        } else {
            BlockStatus::Playing
        }
    }
}

/// Nominal playing time of `len` samples at the engine rate.
pub fn buffer_duration(len: usize) -> Duration {
    Duration::from_secs_f64(len as f64 / SAMPLE_RATE as f64)
}

/// Play `buffer` on the default output device and block until it is done.
///
/// Returns once `duration(buffer) + grace` has elapsed, regardless of when
/// the callback reported completion.
pub fn stream_buffer(buffer: Vec<f32>, grace: Duration) -> Result<(), PlaybackError> {
    let host = cpal::default_host();
    let device = host.default_output_device().ok_or(PlaybackError::NoDevice)?;

    let config = cpal::StreamConfig {
        channels: 1,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };
    let channels = config.channels as usize;

    let wait = buffer_duration(buffer.len()) + grace;
    let samples = buffer.len();
    let mut cursor = PlaybackCursor::new(buffer);
    let complete = cursor.completion_flag();

    let stream = device.build_output_stream(
        &config,
        move |data: &mut [f32], _| {
            cursor.fill_interleaved(data, channels);
        },
        |err| tracing::warn!(%err, "output stream error"),
        None,
    )?;
    stream.play()?;

    tracing::info!(
        samples,
        sample_rate = SAMPLE_RATE,
        wait_ms = wait.as_millis() as u64,
        "output stream started"
    );

    thread::sleep(wait);
    drop(stream);

    tracing::debug!(complete = complete.load(Ordering::Acquire), "output stream closed");
    Ok(())
}
