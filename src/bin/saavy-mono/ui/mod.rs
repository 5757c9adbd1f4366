//! TUI module for saavy-mono
//!
//! Parameter list on the left; the last played note's waveform and spectrum
//! on the right.

mod params;
mod spectrum;
mod status;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use super::app::App;

use params::render_params;
use spectrum::render_spectrum;
use status::render_status;
use waveform::render_waveform;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(10),   // Params + scopes
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_status(frame, rows[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(rows[1]);

    render_params(frame, columns[0], app);

    let scopes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    let preview = app.preview.as_ref();
    render_waveform(frame, scopes[0], preview.map(|p| p.window()).unwrap_or(&[]));
    render_spectrum(frame, scopes[1], preview.map(|p| p.samples.as_slice()).unwrap_or(&[]));

    let help = Paragraph::new(
        " [↑↓] Select  [←→] Adjust  [A..K] Play  [Z/X] Octave  [V] Voice 2  [Q] Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, rows[2]);
}
