//! TCP relay - fans snapshots and moves out to every connected client
//!
//! Each client receives the latest snapshot on connect, then every broadcast line. Commands
//! sent by any client go through the [`RelayHub`], which announces them as `move` messages
//! before forwarding them to the game loop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{broadcast, oneshot, watch};
use tokio::task::JoinSet;

use crate::core::Snapshot;
use crate::engine::{CommandSink, EngineError, SnapshotSource};
use crate::protocol::{ClientMessage, Message};
use crate::types::Command;

const LINE_CAPACITY: usize = 256;
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Relay server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7878,
        }
    }
}

impl RelayConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKTRIS_RELAY_HOST`
    /// - `BLOCKTRIS_RELAY_PORT`
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let host = env::var("BLOCKTRIS_RELAY_HOST").unwrap_or(defaults.host);
        let port = env::var("BLOCKTRIS_RELAY_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.port);

        Self { host, port }
    }

    /// `BLOCKTRIS_RELAY_ENABLED` is `1` or `true`
    pub fn is_enabled() -> bool {
        std::env::var("BLOCKTRIS_RELAY_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Shared relay state: the latest snapshot, the outbound line broadcast and the command path
/// into the game loop
pub struct RelayHub {
    lines: broadcast::Sender<String>,
    latest: watch::Sender<Option<Snapshot>>,
    shutdown: watch::Sender<bool>,
    commands: CommandSink,
}

impl RelayHub {
    pub fn new(commands: CommandSink) -> Self {
        let (lines, _) = broadcast::channel(LINE_CAPACITY);
        let (latest, _) = watch::channel(None);
        let (shutdown, _) = watch::channel(false);
        Self {
            lines,
            latest,
            shutdown,
            commands,
        }
    }

    /// Remember the snapshot and broadcast it as a `stateUpdate`
    pub fn publish_snapshot(&self, snap: &Snapshot) {
        self.latest.send_replace(Some(snap.clone()));
        self.broadcast(&Message::state_update(snap));
    }

    pub fn latest(&self) -> Option<Snapshot> {
        self.latest.borrow().clone()
    }

    pub fn subscribe_lines(&self) -> broadcast::Receiver<String> {
        self.lines.subscribe()
    }

    /// Announce a command as a `move` with the preceding snapshot, then forward it
    pub async fn submit(&self, command: Command) -> Result<(), EngineError> {
        if let Some(preceding) = self.latest() {
            self.broadcast(&Message::movement(command.code(), &preceding));
        }
        self.commands.send(command).await
    }

    /// Submit a raw command code; unknown codes are ignored and return `Ok(false)`
    pub async fn submit_code(&self, code: u8) -> Result<bool, EngineError> {
        match Command::from_code(code) {
            Some(command) => self.submit(command).await.map(|_| true),
            None => Ok(false),
        }
    }

    fn broadcast(&self, message: &Message) {
        match message.to_line() {
            Ok(line) => {
                // Nobody connected yet is fine.
                let _ = self.lines.send(line);
            }
            Err(e) => eprintln!("[Relay] Failed to encode message: {}", e),
        }
    }

    fn close(&self) {
        self.shutdown.send_replace(true);
    }

    fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }
}

/// Run the relay until the snapshot stream ends
///
/// Pumps snapshots into the hub, accepts clients, and forwards their commands. Once the game
/// loop finishes, connected clients get what is left in their queue and are disconnected.
pub async fn run_relay(
    config: RelayConfig,
    hub: Arc<RelayHub>,
    mut snapshots: SnapshotSource,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let bound = listener.local_addr()?;
    println!("[Relay] TCP server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut clients = JoinSet::new();
    let mut client_id_counter = 0usize;

    loop {
        tokio::select! {
            snap = snapshots.recv() => match snap {
                Some(snap) => hub.publish_snapshot(&snap),
                None => break,
            },
            accepted = listener.accept() => {
                let (socket, addr) = accepted?;
                client_id_counter += 1;
                let client_id = client_id_counter;
                println!("[Relay] Client {} connected from {}", client_id, addr);

                let hub = Arc::clone(&hub);
                clients.spawn(async move {
                    if let Err(e) = handle_client(socket, client_id, hub).await {
                        eprintln!("[Relay] Client {} error: {}", client_id, e);
                    }
                    println!("[Relay] Client {} disconnected", client_id);
                });
            }
            Some(_) = clients.join_next(), if !clients.is_empty() => {}
        }
    }

    println!(
        "[Relay] Game finished, closing {} client(s) ({} snapshots skipped)",
        clients.len(),
        snapshots.dropped()
    );
    hub.close();
    let drained = tokio::time::timeout(DRAIN_TIMEOUT, async {
        while clients.join_next().await.is_some() {}
    })
    .await;
    if drained.is_err() {
        clients.shutdown().await;
    }
    Ok(())
}

async fn handle_client(
    socket: TcpStream,
    client_id: usize,
    hub: Arc<RelayHub>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut incoming = BufReader::new(reader).lines();
    let mut outgoing = hub.subscribe_lines();
    let mut shutdown = hub.shutdown_signal();

    if let Some(snap) = hub.latest() {
        write_line(&mut writer, &Message::state_update(&snap).to_line()?).await?;
    }

    loop {
        tokio::select! {
            line = outgoing.recv() => match line {
                Ok(line) => write_line(&mut writer, &line).await?,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    eprintln!("[Relay] Client {} lagged, skipped {} messages", client_id, n);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            line = incoming.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<ClientMessage>(&line) {
                    Ok(msg) => {
                        if let Err(EngineError::Closed) = hub.submit_code(msg.code()).await {
                            break;
                        }
                    }
                    Err(e) => eprintln!("[Relay] Client {} sent invalid message: {}", client_id, e),
                }
            }
            _ = async { shutdown.wait_for(|closed| *closed).await.map(|_| ()) } => {
                while let Ok(line) = outgoing.try_recv() {
                    write_line(&mut writer, &line).await?;
                }
                break;
            }
        }
    }

    writer.shutdown().await?;
    Ok(())
}

async fn write_line<W: AsyncWriteExt + Unpin>(writer: &mut W, line: &str) -> std::io::Result<()> {
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}
