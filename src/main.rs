use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::KeyEventKind;
use tokio::sync::mpsc;

use sysboard::app::App;
use sysboard::config::{Config, load_config, load_config_from_path};
use sysboard::event::{Event, EventHandler};
use sysboard::feed::FeedEvent;
use sysboard::view::MetricsView;
use sysboard::{logging, plain, ui};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(
    name = "sysboard",
    about = "Live CPU, disk, RAM and swap dashboard fed over WebSocket"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// WebSocket endpoint streaming JSON snapshots
    #[arg(long)]
    endpoint: Option<String>,

    /// Reconnect with exponential backoff when the connection drops
    #[arg(long, default_value_t = false)]
    reconnect: bool,

    /// Theme: dark, vivid, light, colorblind
    #[arg(long)]
    theme: Option<String>,

    /// Color support: auto, 256, truecolor, mono
    #[arg(long)]
    color: Option<String>,

    /// Log filter, e.g. info or sysboard=debug (RUST_LOG takes precedence)
    #[arg(long)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print snapshots as plain text instead of drawing the dashboard
    #[arg(long, default_value_t = false)]
    plain: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);
    let log_path = logging::init(&config.logging)?;
    tracing::info!(log = %log_path.display(), endpoint = %config.general.endpoint, "starting");

    let (feed_tx, feed_rx) = mpsc::unbounded_channel::<FeedEvent>();

    if cli.plain {
        let mut view = MetricsView::new(config.feed_settings());
        view.mount(feed_tx);
        let mut stdout = std::io::stdout();
        return plain::run(&mut view, feed_rx, &mut stdout).await;
    }

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let result = run(&mut terminal, &config, feed_tx, feed_rx).await;

    ratatui::restore();

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    config: &Config,
    feed_tx: mpsc::UnboundedSender<FeedEvent>,
    feed_rx: mpsc::UnboundedReceiver<FeedEvent>,
) -> Result<()> {
    let mut app = App::new(config);
    app.view.mount(feed_tx);
    let mut events = EventHandler::new(feed_rx);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        let should_draw = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = app.map_key(key);
                app.dispatch(action);
                true
            }
            Event::Key(_) => false,
            Event::Resize => true,
            Event::Feed(feed_event) => app.on_feed(feed_event),
        };
        if should_draw && app.running {
            terminal.draw(|frame| ui::draw(frame, &app))?;
        }
    }

    if tokio::time::timeout(SHUTDOWN_GRACE, app.view.shutdown())
        .await
        .is_err()
    {
        tracing::warn!("feed did not close within the grace period");
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(ref endpoint) = cli.endpoint {
        config.general.endpoint = endpoint.clone();
    }
    if cli.reconnect {
        config.connection.reconnect = true;
    }
    if let Some(ref theme) = cli.theme {
        config.colors.theme = theme.clone();
    }
    if let Some(ref support) = cli.color {
        config.colors.color_support = support.clone();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref path) = cli.log_file {
        config.logging.file = Some(path.clone());
    }

    config
}
