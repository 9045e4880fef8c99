//! Console game (default binary).
//!
//! The game itself runs in its own task; this binary only forwards key presses into it and
//! draws the snapshots it publishes. With `BLOCKTRIS_RELAY_ENABLED=1` the game is also served
//! to relay clients and local key presses are announced as moves.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use tokio::sync::mpsc;

use blocktris::core::GameConfig;
use blocktris::engine::{spawn_game, CommandSink, EngineConfig, EngineError, SnapshotSource};
use blocktris::input::{handle_key_event, should_quit};
use blocktris::relay::{run_relay, RelayConfig, RelayHub};
use blocktris::term::{GameView, TerminalRenderer, Viewport};
use blocktris::types::Command;

const GAME_OVER_LINGER: Duration = Duration::from_millis(1500);

#[tokio::main]
async fn main() -> Result<()> {
    let seed = std::env::var("BLOCKTRIS_SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok());
    let game_config = match std::env::var("BLOCKTRIS_VARIANT").as_deref() {
        Ok("bucket") => GameConfig::bucket(),
        _ => GameConfig::standard(),
    };
    let engine_config = EngineConfig::from_env();

    let (handle, sink, snapshots) = spawn_game(seed, game_config, &engine_config)?;

    let hub = if RelayConfig::is_enabled() {
        let hub = Arc::new(RelayHub::new(sink.clone()));
        let relay_hub = Arc::clone(&hub);
        let relay_snapshots = handle.subscribe();
        tokio::spawn(async move {
            let config = RelayConfig::from_env();
            if let Err(e) = run_relay(config, relay_hub, relay_snapshots, None).await {
                eprintln!("[Relay] Server error: {}", e);
            }
        });
        Some(hub)
    } else {
        None
    };

    let (key_tx, key_rx) = mpsc::channel::<Command>(16);
    spawn_keyboard_thread(key_tx);
    let forwarder = tokio::spawn(forward_commands(key_rx, sink, hub));

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = play(&mut term, snapshots).await;
    // Always try to restore terminal state.
    let _ = term.exit();
    forwarder.abort();
    result?;

    let last = handle.join().await?;
    println!(
        "[Game] Game over: seed {}, {} pieces, {} lines",
        last.seed, last.pieces_spawned, last.lines_cleared
    );
    Ok(())
}

async fn play(term: &mut TerminalRenderer, mut snapshots: SnapshotSource) -> Result<()> {
    let view = GameView::default();
    let mut last = None;

    while let Some(snap) = snapshots.recv().await {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        term.draw(&view.render(&snap, Viewport::new(w, h)))?;
        last = Some(snap);
    }

    if last.as_ref().is_some_and(|s| s.is_game_over()) {
        tokio::time::sleep(GAME_OVER_LINGER).await;
    }
    Ok(())
}

/// Route key commands to the relay (so they are announced) or straight to the game
async fn forward_commands(
    mut keys: mpsc::Receiver<Command>,
    sink: CommandSink,
    hub: Option<Arc<RelayHub>>,
) {
    while let Some(command) = keys.recv().await {
        let sent = match &hub {
            Some(hub) => hub.submit(command).await,
            None => sink.send(command).await,
        };
        if let Err(EngineError::Closed) = sent {
            break;
        }
    }
}

/// Blocking terminal reads live on a plain thread so they never hold up the runtime
fn spawn_keyboard_thread(tx: mpsc::Sender<Command>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(_) => break,
            }
            let Ok(Event::Key(key)) = event::read() else {
                continue;
            };
            let command = if should_quit(key) {
                Some(Command::Stop)
            } else {
                handle_key_event(key)
            };
            if let Some(command) = command {
                if tx.blocking_send(command).is_err() {
                    break;
                }
            }
        }
    });
}
