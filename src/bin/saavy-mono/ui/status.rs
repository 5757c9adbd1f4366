//! Status bar widget - octave, last note and its measured pitch

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use saavy_mono::SAMPLE_RATE;

use crate::app::App;

pub fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" saavy-mono ").borders(Borders::ALL);

    let mut spans = vec![
        Span::styled(
            format!(" Octave: {}  ", app.octave),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:.1}kHz  ", SAMPLE_RATE as f64 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if let Some(preview) = &app.preview {
        let pitch = preview
            .dominant_hz
            .map_or_else(|| String::from("--"), |hz| format!("{hz:.1} Hz"));
        spans.push(Span::styled(
            format!("Note: {}  Peak at: {}  RMS: {:.2}  ", preview.name(), pitch, preview.rms),
            Style::default().fg(Color::Magenta),
        ));
    }

    spans.push(Span::styled(
        app.status.clone(),
        Style::default().fg(Color::Green),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
