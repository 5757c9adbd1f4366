//! saavy-mono - terminal front-end for the mono synth
//!
//! Run with: cargo run --bin saavy-mono
//! Logs go to `$TMPDIR/saavy-mono.log`; set RUST_LOG to change the level.

mod app;
mod params;
mod ui;

use std::{fs::File, sync::Mutex};

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing_subscriber::EnvFilter;

use app::App;
use saavy_mono::{engine::NoteDispatcher, EngineConfig};

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    init_logging()?;

    let config = EngineConfig::default();
    tracing::info!(
        note_length = config.note_length,
        grace_ms = config.playback_grace.as_millis() as u64,
        queue = config.queue_capacity,
        "starting saavy-mono"
    );

    let dispatcher = NoteDispatcher::new(config);
    let mut app = App::new(dispatcher, config);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}

/// The TUI owns stdout, so logs go to a file.
fn init_logging() -> EyreResult<()> {
    let path = std::env::temp_dir().join("saavy-mono.log");
    let file = File::create(&path).wrap_err_with(|| format!("failed to create {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
