//! saavy-mono - application state and event loop

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use saavy_mono::{
    analysis,
    engine::{NoteDispatcher, NoteTrigger},
    io::converter::note_name,
    synth::render_note,
    EngineConfig, NoteEvent, SynthState,
};

use super::{params::Param, ui};

/// Piano keys on the home row, C to C an octave up.
const PIANO_KEYS: [char; 13] = ['a', 'w', 's', 'e', 'd', 'f', 't', 'g', 'y', 'h', 'u', 'j', 'k'];

const MIN_OCTAVE: i32 = 0;
const MAX_OCTAVE: i32 = 8;

/// Samples shown in the waveform view.
pub const PREVIEW_WINDOW: usize = 1024;

/// Last note played, rendered locally for display.
pub struct Preview {
    pub note: i32,
    pub samples: Vec<f32>,
    pub dominant_hz: Option<f64>,
    pub rms: f32,
}

impl Preview {
    fn render(note: i32, state: &SynthState, config: &EngineConfig) -> Self {
        let event = NoteEvent::with_duration(note, config.note_length);
        let samples = render_note(&event, state);
        Self {
            note,
            dominant_hz: analysis::dominant_frequency(&samples),
            rms: analysis::rms(&samples),
            samples,
        }
    }

    /// Slice for the oscilloscope, taken past the attack when there is room.
    pub fn window(&self) -> &[f32] {
        let start = (self.samples.len() / 4).min(self.samples.len().saturating_sub(PREVIEW_WINDOW));
        let end = (start + PREVIEW_WINDOW).min(self.samples.len());
        &self.samples[start..end]
    }

    pub fn name(&self) -> String {
        note_name(self.note)
    }
}

pub struct App {
    pub state: SynthState,
    pub params: Vec<Param>,
    pub selected: usize,
    pub octave: i32,
    pub preview: Option<Preview>,
    pub status: String,
    config: EngineConfig,
    dispatcher: NoteDispatcher,
    should_quit: bool,
}

impl App {
    pub fn new(dispatcher: NoteDispatcher, config: EngineConfig) -> Self {
        Self {
            state: SynthState::default(),
            params: Param::all(),
            selected: 0,
            octave: 4,
            preview: None,
            status: String::from("ready"),
            config,
            dispatcher,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.selected = self.selected.checked_sub(1).unwrap_or(self.params.len() - 1);
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % self.params.len();
            }
            KeyCode::Left => self.params[self.selected].adjust(&mut self.state, false),
            KeyCode::Right => self.params[self.selected].adjust(&mut self.state, true),
            KeyCode::Char('v') => self.state.voice2_enabled = !self.state.voice2_enabled,
            KeyCode::Char('z') => self.octave = (self.octave - 1).max(MIN_OCTAVE),
            KeyCode::Char('x') => self.octave = (self.octave + 1).min(MAX_OCTAVE),
            KeyCode::Char(c) => {
                if let Some(note) = key_to_note(c, self.octave) {
                    self.trigger(note);
                }
            }
            _ => {}
        }
    }

    fn trigger(&mut self, note: i32) {
        // one snapshot feeds both the audio and the preview
        let snapshot = self.state;

        self.status = match self.dispatcher.submit(NoteTrigger {
            note,
            state: snapshot,
        }) {
            Ok(()) => format!("playing {}", note_name(note)),
            Err(err) => err.to_string(),
        };

        self.preview = Some(Preview::render(note, &snapshot, &self.config));
    }
}

/// Note index for a piano key in the given octave (octave 4 starts at C4 = 60).
pub fn key_to_note(key: char, octave: i32) -> Option<i32> {
    let offset = PIANO_KEYS.iter().position(|&k| k == key)? as i32;
    Some(12 * (octave + 1) + offset)
}
