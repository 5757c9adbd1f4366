//! Spectrum widget
//!
//! Log-frequency magnitude plot of the whole last note.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use saavy_mono::analysis::display_spectrum;

/// Number of points plotted
const SPECTRUM_POINTS: usize = 64;
const MAX_DISPLAY_HZ: f64 = 20_000.0;
const FLOOR_DB: f64 = -90.0;

pub fn render_spectrum(frame: &mut Frame, area: Rect, samples: &[f32]) {
    let block = Block::default().title(" Spectrum ").borders(Borders::ALL);

    // x is log10(Hz) so the axis reads as octaves
    let data: Vec<(f64, f64)> = display_spectrum(samples, SPECTRUM_POINTS, MAX_DISPLAY_HZ)
        .into_iter()
        .map(|(hz, db)| (hz.log10(), db.max(FLOOR_DB)))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Magenta))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([20.0f64.log10(), MAX_DISPLAY_HZ.log10()])
                .labels(["20", "200", "2k", "20k"].map(Span::raw))
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, 0.0])
                .labels(["-90", "-45", "0"].map(Span::raw))
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
