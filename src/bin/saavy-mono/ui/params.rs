//! Parameter list widget

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::{app::App, params::Param};

pub fn render_params(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Patch ").borders(Borders::ALL);
    let visible = block.inner(area).height as usize;

    let mut lines = Vec::with_capacity(app.params.len() + 4);
    let mut selected_line = 0;
    let mut group = "";

    for (i, param) in app.params.iter().enumerate() {
        if param.group() != group {
            group = param.group();
            lines.push(Line::from(Span::styled(
                format!("── {group} "),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
        }

        let dimmed =
            group == "Voice 2" && !app.state.voice2_enabled && *param != Param::Voice2Enabled;
        let style = if i == app.selected {
            selected_line = lines.len();
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else if dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {:<12}", param.label()), style),
            Span::styled(format!("{:>14} ", param.display(&app.state)), style),
        ]));
    }

    // keep the selection on screen
    let scroll = selected_line.saturating_sub(visible.saturating_sub(1)) as u16;

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
