//! WebSocket channel to the PocketClaw server.
//!
//! The socket lives on a background tokio task that reconnects with
//! exponential backoff. The dashboard side only touches three things:
//!
//! ```text
//!  dashboard thread                       tokio task
//!  ────────────────                       ──────────
//!  send() ── UnboundedSender<String> ───▶ write half
//!  next_event() ◀── std mpsc ─────────── read half (+ connected/disconnected)
//!  is_connected() ◀── AtomicBool ──────── set on handshake / cleared on loss
//! ```
//!
//! Sends while disconnected are rejected rather than queued, and anything
//! still buffered when a connection drops is discarded before reconnecting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::transport::{Channel, ChannelError};
use super::types::{Command, EventKind, InboundEvent};

/// First reconnect delay; doubles per failed attempt.
const BASE_RECONNECT_DELAY: Duration = Duration::from_millis(500);
/// Upper bound on the reconnect delay.
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(10);

pub struct WsChannel {
    url: String,
    connected: Arc<AtomicBool>,
    events_tx: mpsc::Sender<InboundEvent>,
    events_rx: mpsc::Receiver<InboundEvent>,
    outbound_tx: Option<UnboundedSender<String>>,
    task: Option<tokio::task::AbortHandle>,
}

impl WsChannel {
    pub fn new(url: impl Into<String>) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            url: url.into(),
            connected: Arc::new(AtomicBool::new(false)),
            events_tx,
            events_rx,
            outbound_tx: None,
            task: None,
        }
    }
}

impl Drop for WsChannel {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Channel for WsChannel {
    fn name(&self) -> &str {
        "websocket"
    }

    fn connect(&mut self) -> Result<(), ChannelError> {
        if self.outbound_tx.is_some() {
            debug!("connect() called again, connection task already running");
            return Ok(());
        }

        let handle = tokio::runtime::Handle::try_current()
            .map_err(|e| ChannelError::Runtime(e.to_string()))?;

        let (outbound_tx, outbound_rx) = unbounded_channel();
        let url = self.url.clone();
        let connected = Arc::clone(&self.connected);
        let events = self.events_tx.clone();

        info!("Starting WebSocket connection task for {}", url);
        let task = handle.spawn(async move {
            connection_loop(url, connected, events, outbound_rx).await;
        });

        self.outbound_tx = Some(outbound_tx);
        self.task = Some(task.abort_handle());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn next_event(&mut self) -> Option<InboundEvent> {
        self.events_rx.try_recv().ok()
    }

    fn send(&mut self, command: Command) -> Result<(), ChannelError> {
        if !self.is_connected() {
            return Err(ChannelError::NotConnected);
        }
        let Some(tx) = &self.outbound_tx else {
            return Err(ChannelError::NotConnected);
        };
        let json =
            serde_json::to_string(&command).map_err(|e| ChannelError::Encode(e.to_string()))?;
        debug!("Sending {}", command.summary());
        tx.send(json).map_err(|_| ChannelError::NotConnected)
    }
}

/// How a single connection attempt ended.
enum SessionEnd {
    /// Handshake never completed.
    Failed(String),
    /// Was connected, then lost the socket.
    Dropped(String),
    /// The owning `WsChannel` went away.
    Shutdown,
}

fn reconnect_delay(attempt: u32) -> Duration {
    BASE_RECONNECT_DELAY
        .saturating_mul(2u32.saturating_pow(attempt.min(5)))
        .min(MAX_RECONNECT_DELAY)
}

async fn connection_loop(
    url: String,
    connected: Arc<AtomicBool>,
    events: mpsc::Sender<InboundEvent>,
    mut outbound_rx: UnboundedReceiver<String>,
) {
    let mut attempt: u32 = 0;

    loop {
        match run_session(&url, &connected, &events, &mut outbound_rx).await {
            SessionEnd::Shutdown => {
                info!("WebSocket connection task shutting down");
                return;
            }
            SessionEnd::Failed(reason) => {
                warn!("WebSocket connection failed (attempt {attempt}): {reason}");
                attempt = attempt.saturating_add(1);
            }
            SessionEnd::Dropped(reason) => {
                warn!("WebSocket connection lost: {reason}");
                attempt = 0;
            }
        }

        let delay = reconnect_delay(attempt);
        debug!("Reconnecting in {:?}", delay);
        tokio::time::sleep(delay).await;
    }
}

async fn run_session(
    url: &str,
    connected: &AtomicBool,
    events: &mpsc::Sender<InboundEvent>,
    outbound_rx: &mut UnboundedReceiver<String>,
) -> SessionEnd {
    let (ws_stream, _) = match connect_async(url).await {
        Ok(pair) => pair,
        Err(e) => return SessionEnd::Failed(format!("connect: {e}")),
    };
    let (mut write, mut read) = ws_stream.split();

    // Anything sent during a previous connection that never made it out is stale.
    while outbound_rx.try_recv().is_ok() {}

    connected.store(true, Ordering::SeqCst);
    info!("WebSocket connected to {}", url);
    if events.send(InboundEvent::new(EventKind::Connected)).is_err() {
        return SessionEnd::Shutdown;
    }

    let end = loop {
        tokio::select! {
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(event) = decode_event(&text)
                            && events.send(event).is_err()
                        {
                            break SessionEnd::Shutdown;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        break SessionEnd::Dropped("connection closed by server".into());
                    }
                    Some(Err(e)) => {
                        break SessionEnd::Dropped(format!("read error: {e}"));
                    }
                    _ => {} // Binary, Ping/Pong frames handled by tungstenite.
                }
            }
            outbound = outbound_rx.recv() => {
                match outbound {
                    Some(json) => {
                        if let Err(e) = write.send(Message::Text(json)).await {
                            break SessionEnd::Dropped(format!("send error: {e}"));
                        }
                    }
                    None => {
                        let _ = write.close().await;
                        break SessionEnd::Shutdown;
                    }
                }
            }
        }
    };

    connected.store(false, Ordering::SeqCst);
    if !matches!(end, SessionEnd::Shutdown)
        && events.send(InboundEvent::new(EventKind::Disconnected)).is_err()
    {
        return SessionEnd::Shutdown;
    }
    end
}

/// Parse one text frame. Unknown or malformed frames are logged and skipped.
fn decode_event(text: &str) -> Option<InboundEvent> {
    match serde_json::from_str::<InboundEvent>(text) {
        Ok(event) if matches!(event.kind, EventKind::Connected | EventKind::Disconnected) => {
            debug!("Ignoring server-sent {} frame", event.kind.as_str());
            None
        }
        Ok(event) => {
            debug!("Received {} event", event.kind.as_str());
            Some(event)
        }
        Err(e) => {
            warn!("Skipping unrecognized frame ({e}): {}", preview(text));
            None
        }
    }
}

fn preview(text: &str) -> String {
    text.chars().take(120).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconnect_delay_doubles_and_caps() {
        assert_eq!(reconnect_delay(0), Duration::from_millis(500));
        assert_eq!(reconnect_delay(1), Duration::from_secs(1));
        assert_eq!(reconnect_delay(2), Duration::from_secs(2));
        assert_eq!(reconnect_delay(4), Duration::from_secs(8));
        assert_eq!(reconnect_delay(5), MAX_RECONNECT_DELAY);
        assert_eq!(reconnect_delay(40), MAX_RECONNECT_DELAY);
    }

    #[test]
    fn test_decode_event_skips_synthetic_and_unknown_frames() {
        assert!(decode_event(r#"{"type":"connected"}"#).is_none());
        assert!(decode_event(r#"{"type":"mystery"}"#).is_none());
        assert!(decode_event("not json").is_none());
        let event = decode_event(r#"{"type":"code","content":"ls"}"#).unwrap();
        assert_eq!(event.kind, EventKind::Code);
    }

    #[test]
    fn test_connect_without_runtime_fails() {
        let mut channel = WsChannel::new("ws://127.0.0.1:1/ws");
        let err = channel.connect().unwrap_err();
        assert!(matches!(err, ChannelError::Runtime(_)));
    }

    #[test]
    fn test_send_before_connect_is_rejected() {
        let mut channel = WsChannel::new("ws://127.0.0.1:1/ws");
        assert!(!channel.is_connected());
        assert_eq!(channel.run_tool("status"), Err(ChannelError::NotConnected));
        assert!(channel.next_event().is_none());
    }
}
