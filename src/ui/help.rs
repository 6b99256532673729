use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::format::truncate_unicode;
use crate::ui::theme::Theme;

const WIDTH: u16 = 44;

/// Centered overlay: keybinds, then where the data comes from.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    entries: &[(String, &str)],
    feed_lines: &[(&str, String)],
    theme: &Theme,
) {
    let width = WIDTH.min(area.width.saturating_sub(4));
    // borders + keybinds + blank separator + feed details
    let wanted = entries.len() + feed_lines.len() + 3;
    let height = (wanted as u16).min(area.height.saturating_sub(2));

    let overlay = centered_rect(width, height, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " Help ",
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(overlay);

    let key_style = Style::default()
        .fg(theme.pill_key_fg)
        .bg(theme.pill_key_bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(theme.pill_desc_fg);

    let mut lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {key:>8} "), key_style),
                Span::styled(format!("  {desc}"), desc_style),
            ])
        })
        .collect();

    lines.push(Line::raw(""));
    let value_width = inner.width.saturating_sub(12) as usize;
    for (name, value) in feed_lines {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {name:<10}"),
                Style::default().fg(theme.text_secondary),
            ),
            Span::styled(truncate_unicode(value, value_width), desc_style),
        ]));
    }

    frame.render_widget(block, overlay);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .style(Style::default().bg(theme.surface_bg)),
        inner,
    );
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let [vert] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [horiz] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vert);
    horiz
}
