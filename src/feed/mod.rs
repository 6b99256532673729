pub mod backoff;

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use backoff::Backoff;

pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9000/ws";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Connected,
    /// One message body, as text.
    Message(String),
    /// The connection ended or could not be opened.
    Closed,
}

#[derive(Debug, Clone)]
pub struct FeedSettings {
    pub endpoint: String,
    pub reconnect: bool,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl FeedSettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            reconnect: false,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Owns the connection task. Closing or dropping the handle closes the socket.
pub struct FeedHandle {
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn close(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Closes the connection and waits for the task to finish.
    pub async fn shutdown(mut self) {
        self.close();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            tracing::warn!(error = %err, "feed task did not shut down cleanly");
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.close();
    }
}

/// Spawns the connection task on the current tokio runtime.
pub fn spawn(settings: FeedSettings, tx: mpsc::UnboundedSender<FeedEvent>) -> FeedHandle {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let task = tokio::spawn(run(settings, tx, shutdown_rx));
    FeedHandle {
        shutdown: Some(shutdown_tx),
        task: Some(task),
    }
}

enum SessionEnd {
    Shutdown,
    Lost,
    ReceiverGone,
}

async fn run(
    settings: FeedSettings,
    tx: mpsc::UnboundedSender<FeedEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut backoff = Backoff::new(settings.initial_backoff, settings.max_backoff);

    loop {
        match session(&settings.endpoint, &tx, &mut shutdown, &mut backoff).await {
            SessionEnd::Shutdown | SessionEnd::ReceiverGone => break,
            SessionEnd::Lost => {
                if tx.send(FeedEvent::Closed).is_err() || !settings.reconnect {
                    break;
                }
                let delay = backoff.next_delay();
                tracing::info!(
                    endpoint = %settings.endpoint,
                    delay_ms = delay.as_millis() as u64,
                    "reconnecting"
                );
                tokio::select! {
                    _ = &mut shutdown => break,
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }

    tracing::debug!(endpoint = %settings.endpoint, "feed task finished");
}

async fn session(
    endpoint: &str,
    tx: &mpsc::UnboundedSender<FeedEvent>,
    shutdown: &mut oneshot::Receiver<()>,
    backoff: &mut Backoff,
) -> SessionEnd {
    let connected = tokio::select! {
        _ = &mut *shutdown => return SessionEnd::Shutdown,
        result = connect_async(endpoint) => result,
    };
    let mut ws = match connected {
        Ok((ws, _response)) => ws,
        Err(err) => {
            tracing::warn!(endpoint, error = %err, "connection failed");
            return SessionEnd::Lost;
        }
    };

    tracing::info!(endpoint, "connected");
    backoff.reset();
    if tx.send(FeedEvent::Connected).is_err() {
        return SessionEnd::ReceiverGone;
    }

    loop {
        tokio::select! {
            _ = &mut *shutdown => {
                if let Err(err) = ws.close(None).await {
                    tracing::debug!(error = %err, "close handshake failed");
                }
                return SessionEnd::Shutdown;
            }
            frame = ws.next() => {
                let text = match frame {
                    Some(Ok(Message::Text(text))) => text.as_str().to_owned(),
                    Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                        Ok(text) => text,
                        Err(err) => {
                            tracing::warn!(error = %err, "dropping non-UTF-8 binary frame");
                            continue;
                        }
                    },
                    Some(Ok(Message::Close(frame))) => {
                        tracing::info!(endpoint, ?frame, "server closed the connection");
                        return SessionEnd::Lost;
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(err)) => {
                        tracing::warn!(endpoint, error = %err, "connection error");
                        return SessionEnd::Lost;
                    }
                    None => return SessionEnd::Lost,
                };
                if tx.send(FeedEvent::Message(text)).is_err() {
                    return SessionEnd::ReceiverGone;
                }
            }
        }
    }
}
