pub mod cpu_panel;
pub mod header;
pub mod help;
pub mod statusbar;
pub mod theme;
pub mod usage_panel;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let sections_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(usage_panel::HEIGHT),
            Constraint::Length(usage_panel::HEIGHT),
            Constraint::Length(usage_panel::HEIGHT),
            Constraint::Min(0),
        ])
        .split(body[1]);

    let dashboard = app.view.dashboard();

    header::render(
        frame,
        chunks[0],
        app.view.endpoint(),
        app.view.state(),
        dashboard.cores.len(),
        &app.theme,
    );
    cpu_panel::render(frame, body[0], &dashboard.cores, &app.theme);
    for (row, area) in dashboard.sections.iter().zip(sections_area.iter()) {
        usage_panel::render(frame, *area, row, &app.theme);
    }
    statusbar::render(frame, chunks[2], &app.keybinds, &app.theme);

    // Overlay goes last so it sits on top
    if app.show_help() {
        help::render(
            frame,
            frame.area(),
            &app.help_entries(),
            &app.feed_summary(),
            &app.theme,
        );
    }
}

#[cfg(test)]
mod tests;
