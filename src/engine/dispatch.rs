use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::{engine::EngineConfig, error::DispatchError, io, synth::patch::SynthState};

/*
Note dispatch
=============

    key press ──submit──▶ [ SPSC ring ] ──▶ dispatcher thread ──spawn──▶ worker
                                                                   render + play

The caller never blocks: `submit` is a single lock-free push. The dispatcher
thread drains the ring and starts one detached worker per trigger, so
overlapping notes each get their own stream. Nothing is cancelled and a
full ring drops the new trigger.
*/

const IDLE_POLL: Duration = Duration::from_millis(20);

/// One key press with the parameters it was pressed with.
#[derive(Debug, Clone, Copy)]
pub struct NoteTrigger {
    pub note: i32,
    pub state: SynthState,
}

type Handler = Arc<dyn Fn(NoteTrigger) + Send + Sync>;

pub struct NoteDispatcher {
    tx: Option<Producer<NoteTrigger>>,
    thread: Option<JoinHandle<()>>,
}

impl NoteDispatcher {
    /// Dispatcher whose workers render and play each trigger.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_handler(config.queue_capacity, move |trigger: NoteTrigger| {
            io::play_note(trigger.note, &trigger.state, &config)
        })
    }

    /// Dispatcher that runs `handler` on a fresh worker thread per trigger.
    pub fn with_handler<F>(capacity: usize, handler: F) -> Self
    where
        F: Fn(NoteTrigger) + Send + Sync + 'static,
    {
        let (tx, rx) = RingBuffer::new(capacity.max(1));
        let handler: Handler = Arc::new(handler);

        let thread = thread::Builder::new()
            .name("note-dispatch".into())
            .spawn(move || dispatch_loop(rx, handler));

        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::warn!(%err, "failed to start note dispatcher");
                None
            }
        };

        Self { tx: Some(tx), thread }
    }

    /// Queue a note. Never blocks.
    pub fn submit(&mut self, trigger: NoteTrigger) -> Result<(), DispatchError> {
        let Some(thread) = &self.thread else {
            return Err(DispatchError::Disconnected);
        };
        let tx = self.tx.as_mut().ok_or(DispatchError::Disconnected)?;
        if tx.is_abandoned() {
            return Err(DispatchError::Disconnected);
        }

        match tx.push(trigger) {
            Ok(()) => {
                thread.thread().unpark();
                Ok(())
            }
            Err(PushError::Full(dropped)) => {
                tracing::warn!(note = dropped.note, "note queue full, trigger dropped");
                Err(DispatchError::QueueFull(dropped.note))
            }
        }
    }
}

impl Drop for NoteDispatcher {
    fn drop(&mut self) {
        // closing the producer lets the dispatcher exit once the ring is empty
        self.tx.take();
        if let Some(handle) = self.thread.take() {
            handle.thread().unpark();
            if handle.join().is_err() {
                tracing::warn!("note dispatcher panicked");
            }
        }
    }
}

fn dispatch_loop(mut rx: Consumer<NoteTrigger>, handler: Handler) {
    let mut spawned: u64 = 0;
    loop {
        while let Ok(trigger) = rx.pop() {
            spawned += 1;
            let handler = Arc::clone(&handler);
            let worker = thread::Builder::new()
                .name(format!("note-{spawned}"))
                .spawn(move || handler(trigger));

            match worker {
                Ok(_) => tracing::debug!(note = trigger.note, "note worker started"),
                Err(err) => tracing::warn!(%err, note = trigger.note, "failed to start note worker"),
            }
        }

        if rx.is_abandoned() && rx.is_empty() {
            break;
        }
        thread::park_timeout(IDLE_POLL);
    }
}
