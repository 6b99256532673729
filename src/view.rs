use tokio::sync::mpsc;

use crate::feed::{self, FeedEvent, FeedHandle, FeedSettings};
use crate::format::{bytes_to_gb, format_percent, percentage};
use crate::snapshot::{Snapshot, UsageSection, parse_snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No snapshot received yet.
    Disconnected,
    Live,
    Unmounted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    Applied,
    Rejected,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Disk,
    Ram,
    Swap,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [SectionKind::Disk, SectionKind::Ram, SectionKind::Swap];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Disk => "Disk Usage",
            SectionKind::Ram => "RAM Usage",
            SectionKind::Swap => "Swap Usage",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            SectionKind::Disk => "disk",
            SectionKind::Ram => "ram",
            SectionKind::Swap => "swap",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CoreRow {
    pub label: String,
    pub usage: f64,
    pub usage_text: String,
}

#[derive(Debug, Clone)]
pub struct SectionRow {
    pub kind: SectionKind,
    pub percent: f64,
    pub percent_text: String,
    pub used_text: String,
    pub total_text: String,
}

/// Everything the widgets draw, derived from one snapshot.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub cores: Vec<CoreRow>,
    pub sections: [SectionRow; 3],
}

impl Dashboard {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let cores = snapshot
            .cpu
            .iter()
            .map(|core| CoreRow {
                label: core.label.clone(),
                usage: core.usage,
                usage_text: format_percent(core.usage),
            })
            .collect();

        let sections = SectionKind::ALL.map(|kind| {
            let section = match kind {
                SectionKind::Disk => snapshot.disk,
                SectionKind::Ram => snapshot.ram,
                SectionKind::Swap => snapshot.swap,
            };
            section_row(kind, section)
        });

        Dashboard { cores, sections }
    }
}

fn section_row(kind: SectionKind, section: Option<UsageSection>) -> SectionRow {
    // An absent section renders like one that never arrived: every figure is NaN.
    let UsageSection { used, total } = section.unwrap_or(UsageSection {
        used: f64::NAN,
        total: f64::NAN,
    });
    let percent = percentage(used, total);
    SectionRow {
        kind,
        percent,
        percent_text: format_percent(percent),
        used_text: bytes_to_gb(used),
        total_text: bytes_to_gb(total),
    }
}

/// The dashboard component: owns the feed and the latest snapshot.
pub struct MetricsView {
    settings: FeedSettings,
    snapshot: Snapshot,
    state: ViewState,
    feed: Option<FeedHandle>,
    applied: u64,
    rejected: u64,
}

impl MetricsView {
    pub fn new(settings: FeedSettings) -> Self {
        Self {
            settings,
            snapshot: Snapshot::default(),
            state: ViewState::Disconnected,
            feed: None,
            applied: 0,
            rejected: 0,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    pub fn settings(&self) -> &FeedSettings {
        &self.settings
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn applied_count(&self) -> u64 {
        self.applied
    }

    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }

    /// Opens the streaming connection. Feed events are delivered on `tx`.
    /// Must be called from within a tokio runtime. A second call is a no-op.
    pub fn mount(&mut self, tx: mpsc::UnboundedSender<FeedEvent>) {
        if self.feed.is_some() || self.state == ViewState::Unmounted {
            return;
        }
        tracing::info!(endpoint = %self.settings.endpoint, "mounting metrics view");
        self.feed = Some(feed::spawn(self.settings.clone(), tx));
    }

    /// Closes the connection. No message is applied afterwards.
    pub fn unmount(&mut self) {
        if self.state == ViewState::Unmounted {
            return;
        }
        if let Some(feed) = self.feed.as_mut() {
            feed.close();
        }
        self.state = ViewState::Unmounted;
        tracing::info!(
            applied = self.applied,
            rejected = self.rejected,
            "metrics view unmounted"
        );
    }

    /// Unmounts and waits for the connection task to send its close frame.
    pub async fn shutdown(&mut self) {
        self.unmount();
        if let Some(feed) = self.feed.take() {
            feed.shutdown().await;
        }
    }

    pub fn apply_message(&mut self, text: &str) -> MessageOutcome {
        if self.state == ViewState::Unmounted {
            return MessageOutcome::Ignored;
        }
        match parse_snapshot(text) {
            Ok(snapshot) => {
                tracing::debug!(cores = snapshot.cpu.len(), "snapshot applied");
                self.snapshot = snapshot;
                self.state = ViewState::Live;
                self.applied += 1;
                MessageOutcome::Applied
            }
            Err(err) => {
                self.rejected += 1;
                tracing::warn!(error = %err, len = text.len(), "discarding malformed snapshot");
                MessageOutcome::Rejected
            }
        }
    }

    /// Applies one feed event; returns whether the screen needs a redraw.
    pub fn handle_feed_event(&mut self, event: FeedEvent) -> bool {
        match event {
            FeedEvent::Message(text) => self.apply_message(&text) == MessageOutcome::Applied,
            FeedEvent::Connected => false,
            FeedEvent::Closed => {
                tracing::info!(endpoint = %self.settings.endpoint, "feed closed");
                false
            }
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::from_snapshot(&self.snapshot)
    }
}
