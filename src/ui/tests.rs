use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::action::Action;
use crate::app::App;
use crate::config::Config;
use crate::ui::theme::{ColorSupport, HeatOverrides, Theme};
use crate::ui::{cpu_panel, draw, header, usage_panel};
use crate::view::{Dashboard, ViewState};

const SNAPSHOT: &str = r#"{
    "cpu": {"0": 12.3456, "1": 87.5, "2": 0.0},
    "disk": {"used": 107374182400, "total": 429496729600},
    "ram": {"used": 2147483648, "total": 8589934592},
    "swap": {"used": 0, "total": 0}
}"#;

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            let cell = buf.cell((x, y)).unwrap();
            out.push_str(cell.symbol());
        }
        if y + 1 < area.height {
            out.push('\n');
        }
    }
    out
}

fn render_to_string<F>(width: u16, height: u16, draw: F) -> String
where
    F: FnOnce(&mut ratatui::Frame),
{
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(draw).unwrap();
    let buf = terminal.backend().buffer();
    buffer_to_string(buf)
}

fn make_theme() -> Theme {
    let heat = HeatOverrides {
        low: "#10b981".to_string(),
        mid: "#f97316".to_string(),
        high: "#ef4444".to_string(),
    };
    Theme::from_config("dark", &heat, ColorSupport::Truecolor)
}

fn make_app() -> App {
    let mut config = Config::default();
    config.colors.color_support = "truecolor".to_string();
    App::new(&config)
}

fn live_app() -> App {
    let mut app = make_app();
    app.view.apply_message(SNAPSHOT);
    app
}

fn dashboard_from(json: &str) -> Dashboard {
    let mut app = make_app();
    app.view.apply_message(json);
    app.view.dashboard()
}

#[test]
fn full_frame_shows_every_section() {
    let app = live_app();
    let output = render_to_string(100, 20, |frame| draw(frame, &app));

    assert!(output.contains("System Monitor"));
    assert!(output.contains("ws://127.0.0.1:9000/ws"));
    assert!(output.contains("live · 3 cores"));
    assert!(output.contains("CPU Usage"));
    assert!(output.contains("Disk Usage"));
    assert!(output.contains("RAM Usage"));
    assert!(output.contains("Swap Usage"));
    assert!(output.contains("Used: 100.00 GB, Total: 400.00 GB"));
    assert!(output.contains("Used: 2.00 GB, Total: 8.00 GB"));
    assert!(output.contains("Used: 0.00 GB, Total: 0.00 GB"));
}

#[test]
fn rendering_is_pure() {
    let app = live_app();
    let first = render_to_string(100, 20, |frame| draw(frame, &app));
    let second = render_to_string(100, 20, |frame| draw(frame, &app));
    assert_eq!(first, second);
}

#[test]
fn disconnected_frame_shows_nan_sections() {
    let app = make_app();
    assert_eq!(app.view.state(), ViewState::Disconnected);
    let output = render_to_string(100, 20, |frame| draw(frame, &app));

    assert!(output.contains("waiting for data"));
    assert!(output.contains("Used: NaN GB, Total: NaN GB"));
    assert!(output.contains("NaN%"));
    assert!(!output.contains("Core "));
}

#[test]
fn cpu_panel_renders_one_row_per_core() {
    let dashboard = dashboard_from(SNAPSHOT);
    let output = render_to_string(50, 6, |frame| {
        cpu_panel::render(frame, Rect::new(0, 0, 50, 6), &dashboard.cores, &make_theme());
    });

    let lines: Vec<&str> = output.lines().collect();
    assert!(lines[1].contains("Core 0:") && lines[1].trim_end().ends_with("12.35%│"));
    assert!(lines[2].contains("Core 1:") && lines[2].contains("87.50%"));
    assert!(lines[3].contains("Core 2:") && lines[3].contains("0.00%"));
    assert_eq!(output.matches("Core ").count(), 3);
}

#[test]
fn cpu_panel_wraps_into_columns_when_short() {
    let cores: Vec<String> = (0..6).map(|i| format!("\"{i}\": {}.0", i * 10)).collect();
    let dashboard = dashboard_from(&format!("{{\"cpu\": {{{}}}}}", cores.join(",")));
    // Three inner rows for six cores: two columns.
    let output = render_to_string(80, 5, |frame| {
        cpu_panel::render(frame, Rect::new(0, 0, 80, 5), &dashboard.cores, &make_theme());
    });

    assert_eq!(output.matches("Core ").count(), 6);
    let second_row = output.lines().nth(1).unwrap();
    assert!(second_row.contains("Core 0:") && second_row.contains("Core 3:"));
}

#[test]
fn cpu_panel_survives_out_of_range_usage() {
    let dashboard = dashboard_from(r#"{"cpu": {"hot": 250.0, "cold": -5.0}}"#);
    let output = render_to_string(50, 4, |frame| {
        cpu_panel::render(frame, Rect::new(0, 0, 50, 4), &dashboard.cores, &make_theme());
    });
    assert!(output.contains("250.00%"));
    assert!(output.contains("-5.00%"));
}

#[test]
fn usage_panel_shows_percent_and_bytes() {
    let dashboard = dashboard_from(SNAPSHOT);
    let output = render_to_string(60, 4, |frame| {
        usage_panel::render(
            frame,
            Rect::new(0, 0, 60, 4),
            &dashboard.sections[0],
            &make_theme(),
        );
    });

    assert!(output.contains("Disk Usage"));
    assert!(output.contains("25.00%"));
    assert!(output.contains("Used: 100.00 GB, Total: 400.00 GB"));
}

#[test]
fn usage_panel_zero_total_is_not_numeric() {
    let dashboard = dashboard_from(SNAPSHOT);
    let swap = &dashboard.sections[2];
    assert!(swap.percent.is_nan());

    let output = render_to_string(60, 4, |frame| {
        usage_panel::render(frame, Rect::new(0, 0, 60, 4), swap, &make_theme());
    });
    assert!(output.contains("NaN%"));
}

#[test]
fn header_reflects_view_state() {
    let render = |state| {
        render_to_string(80, 3, |frame| {
            header::render(
                frame,
                Rect::new(0, 0, 80, 3),
                "ws://host:9000/ws",
                state,
                1,
                &make_theme(),
            );
        })
    };

    assert!(render(ViewState::Disconnected).contains("waiting for data"));
    assert!(render(ViewState::Live).contains("live · 1 core "));
    assert!(render(ViewState::Unmounted).contains("closed"));
}

#[test]
fn malformed_message_leaves_frame_unchanged() {
    let mut app = live_app();
    let before = render_to_string(100, 20, |frame| draw(frame, &app));
    app.view.apply_message("{\"cpu\": [1, 2");
    let after = render_to_string(100, 20, |frame| draw(frame, &app));
    assert_eq!(before, after);
}

#[test]
fn help_overlay_lists_keys_and_feed() {
    let mut app = live_app();
    app.dispatch(Action::ToggleHelp);
    let output = render_to_string(100, 20, |frame| draw(frame, &app));

    assert!(output.contains("Help"));
    assert!(output.contains("Toggle help"));
    assert!(output.contains("Cycle theme"));
    assert!(output.contains("Reconnect"));
    assert!(output.contains("Snapshots"));
}

#[test]
fn statusbar_shows_theme_name() {
    let mut app = make_app();
    app.dispatch(Action::CycleTheme);
    let output = render_to_string(100, 20, |frame| draw(frame, &app));
    let last = output.lines().last().unwrap();
    assert!(last.contains("Quit"));
    assert!(last.contains("vivid"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let app = live_app();
    let _ = render_to_string(10, 3, |frame| draw(frame, &app));
    let _ = render_to_string(1, 1, |frame| draw(frame, &app));
}
