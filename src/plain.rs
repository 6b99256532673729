use std::io::{self, Write};

use color_eyre::Result;
use tokio::sync::mpsc;

use crate::feed::FeedEvent;
use crate::view::{Dashboard, MetricsView};

/// Prints every applied snapshot as text until the feed ends or Ctrl+C.
pub async fn run<W: Write>(
    view: &mut MetricsView,
    mut feed_rx: mpsc::UnboundedReceiver<FeedEvent>,
    out: &mut W,
) -> Result<()> {
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = feed_rx.recv() => match event {
                Some(event) => {
                    if view.handle_feed_event(event) {
                        write_dashboard(out, &view.dashboard())?;
                        out.flush()?;
                    }
                }
                None => break,
            },
        }
    }

    view.shutdown().await;
    Ok(())
}

pub fn write_dashboard<W: Write>(out: &mut W, dashboard: &Dashboard) -> io::Result<()> {
    let cores: Vec<String> = dashboard
        .cores
        .iter()
        .map(|core| format!("{}: {}%", core.label, core.usage_text))
        .collect();
    writeln!(out, "{:<5} {}", "cpu", cores.join("  "))?;

    for row in &dashboard.sections {
        writeln!(
            out,
            "{:<5} {}%  used {} GB  total {} GB",
            row.kind.short_name(),
            row.percent_text,
            row.used_text,
            row.total_text
        )?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedSettings;

    fn live_view() -> MetricsView {
        let mut view = MetricsView::new(FeedSettings::default());
        view.apply_message(
            r#"{"cpu": {"0": 12.3456, "1": 50.0},
                "disk": {"used": 107374182400, "total": 429496729600},
                "ram": {"used": 2147483648, "total": 8589934592},
                "swap": {"used": 0, "total": 0}}"#,
        );
        view
    }

    #[test]
    fn writes_one_block_per_snapshot() {
        let mut out = Vec::new();
        write_dashboard(&mut out, &live_view().dashboard()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "cpu   0: 12.35%  1: 50.00%\n\
             disk  25.00%  used 100.00 GB  total 400.00 GB\n\
             ram   25.00%  used 2.00 GB  total 8.00 GB\n\
             swap  NaN%  used 0.00 GB  total 0.00 GB\n\n"
        );
    }

    #[tokio::test]
    async fn run_prints_applied_snapshots_until_feed_ends() {
        let mut view = MetricsView::new(FeedSettings::default());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(FeedEvent::Connected).unwrap();
        tx.send(FeedEvent::Message(r#"{"cpu": {"0": 1.0}}"#.to_string()))
            .unwrap();
        tx.send(FeedEvent::Message("not json".to_string())).unwrap();
        tx.send(FeedEvent::Closed).unwrap();
        drop(tx);

        let mut out = Vec::new();
        run(&mut view, rx, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("cpu ").count(), 1);
        assert!(text.starts_with("cpu   0: 1.00%\n"));
        assert_eq!(view.state(), crate::view::ViewState::Unmounted);
    }
}
