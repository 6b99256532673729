use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::hint::black_box;
use sysboard::app::App;
use sysboard::config::Config;
use sysboard::snapshot::parse_snapshot;
use sysboard::view::Dashboard;

fn make_message(cores: usize) -> String {
    let cpu: Vec<String> = (0..cores)
        .map(|i| format!("\"{i}\": {}.{}", (i * 37) % 100, i % 10))
        .collect();
    format!(
        "{{\"cpu\": {{{}}}, \
          \"disk\": {{\"used\": 536870912000, \"total\": 1073741824000}}, \
          \"ram\": {{\"used\": 3221225472, \"total\": 17179869184}}, \
          \"swap\": {{\"used\": 1073741824, \"total\": 4294967296}}}}",
        cpu.join(", ")
    )
}

fn make_app(message: &str) -> App {
    let mut config = Config::default();
    config.colors.color_support = "truecolor".to_string();
    let mut app = App::new(&config);
    app.view.apply_message(message);
    app
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_snapshot_8_64_256");

    for cores in [8usize, 64, 256] {
        let message = make_message(cores);
        group.bench_with_input(BenchmarkId::from_parameter(cores), &message, |b, message| {
            b.iter(|| {
                let snapshot = parse_snapshot(black_box(message)).expect("bench parse failed");
                black_box(Dashboard::from_snapshot(&snapshot));
            })
        });
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_dashboard_8_64_256");

    for cores in [8usize, 64, 256] {
        let app = make_app(&make_message(cores));
        group.bench_with_input(BenchmarkId::from_parameter(cores), &app, |b, app| {
            b.iter(|| {
                let backend = TestBackend::new(160, 50);
                let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
                terminal
                    .draw(|frame| sysboard::ui::draw(frame, black_box(app)))
                    .expect("bench draw failed");
                black_box(terminal.backend());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_draw);
criterion_main!(benches);
