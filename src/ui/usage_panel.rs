use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::fill_ratio;
use crate::ui::theme::Theme;
use crate::view::SectionRow;

/// Borders plus one bar row and one label row.
pub const HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, row: &SectionRow, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            format!(" {} ", row.kind.title()),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [bar_area, text_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(inner);

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.bar_color(row.percent))
                .bg(theme.gauge_unfilled),
        )
        .use_unicode(true)
        .ratio(fill_ratio(row.percent))
        .label(format!("{}%", row.percent_text));
    frame.render_widget(gauge, bar_area);

    frame.render_widget(
        Paragraph::new(format!(
            "Used: {} GB, Total: {} GB",
            row.used_text, row.total_text
        ))
        .style(Style::default().fg(theme.text_primary)),
        text_area,
    );
}
