use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::ui::theme::Theme;
use crate::view::ViewState;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    endpoint: &str,
    state: ViewState,
    core_count: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let line = Line::from(vec![
        Span::styled(
            " System Monitor ",
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(endpoint, Style::default().fg(theme.text_secondary)),
        Span::raw("  "),
        Span::styled(
            state_label(state, core_count),
            Style::default().fg(theme.accent),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), inner);
}

fn state_label(state: ViewState, core_count: usize) -> String {
    match state {
        ViewState::Disconnected => "waiting for data".to_string(),
        ViewState::Live if core_count == 1 => "live · 1 core".to_string(),
        ViewState::Live => format!("live · {core_count} cores"),
        ViewState::Unmounted => "closed".to_string(),
    }
}
