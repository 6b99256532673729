use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

use crate::format::{fill_ratio, truncate_unicode};
use crate::ui::theme::Theme;
use crate::view::CoreRow;

const LABEL_WIDTH: u16 = 12;
const VALUE_WIDTH: u16 = 8;

/// One row per core, wrapping into extra columns when the panel is too short.
pub fn render(frame: &mut Frame, area: Rect, cores: &[CoreRow], theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.overlay_border))
        .title(Span::styled(
            " CPU Usage ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || cores.is_empty() {
        return;
    }

    let per_column = inner.height as usize;
    let columns = cores.len().div_ceil(per_column);
    let column_areas = Layout::horizontal(vec![Constraint::Fill(1); columns]).split(inner);

    for (index, core) in cores.iter().enumerate() {
        let column = column_areas[index / per_column];
        let row = Rect::new(
            column.x,
            column.y + (index % per_column) as u16,
            column.width,
            1,
        );
        render_row(frame, row, core, theme);
    }
}

fn render_row(frame: &mut Frame, area: Rect, core: &CoreRow, theme: &Theme) {
    let [label_area, bar_area, value_area] = Layout::horizontal([
        Constraint::Length(LABEL_WIDTH),
        Constraint::Min(1),
        Constraint::Length(VALUE_WIDTH),
    ])
    .areas(area);

    let label = truncate_unicode(
        &format!("Core {}:", core.label),
        LABEL_WIDTH.saturating_sub(1) as usize,
    );
    frame.render_widget(
        Paragraph::new(label).style(Style::default().fg(theme.text_primary)),
        label_area,
    );

    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(theme.bar_color(core.usage))
                .bg(theme.gauge_unfilled),
        )
        .use_unicode(true)
        .ratio(fill_ratio(core.usage))
        .label("");
    frame.render_widget(gauge, bar_area);

    frame.render_widget(
        Paragraph::new(format!("{}%", core.usage_text))
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.text_primary)),
        value_area,
    );
}
