//! The game loop: sole owner of a [`Game`].
//!
//! One tokio task per game. It waits for the next command or gravity tick, applies exactly
//! one transition, and publishes a snapshot. Pending commands win over a tick that became
//! ready at the same time, so a given arrival order always produces the same game.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::channels::{CommandSink, SnapshotSource};
use crate::config::EngineConfig;
use crate::core::{seed_from_clock, Game, GameConfig, Snapshot};
use crate::error::EngineError;
use crate::types::Command;

/// Handle to a running game loop
#[derive(Debug)]
pub struct GameHandle {
    task: JoinHandle<Snapshot>,
    subscriptions: broadcast::Receiver<Snapshot>,
}

impl GameHandle {
    /// Add another snapshot consumer, starting at the next published snapshot
    pub fn subscribe(&self) -> SnapshotSource {
        SnapshotSource::new(self.subscriptions.resubscribe())
    }

    /// Wait for the loop to finish and return the final snapshot
    pub async fn join(self) -> Result<Snapshot, EngineError> {
        self.task
            .await
            .map_err(|e| EngineError::Join(e.to_string()))
    }

    /// Kill the loop without publishing a final snapshot
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Hand an already built (possibly staged) game to a new loop task
///
/// Must be called from within a tokio runtime.
pub fn spawn(game: Game, config: &EngineConfig) -> (GameHandle, CommandSink, SnapshotSource) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(config.command_capacity.max(1));
    let (snap_tx, snap_rx) = broadcast::channel::<Snapshot>(config.snapshot_capacity.max(1));

    let subscriptions = snap_rx.resubscribe();
    let task = tokio::spawn(run(game, cmd_rx, snap_tx, config.gravity_interval));

    (
        GameHandle {
            task,
            subscriptions,
        },
        CommandSink::new(cmd_tx),
        SnapshotSource::new(snap_rx),
    )
}

/// Build a game and start its loop
///
/// Without a seed, one is derived from the wall clock.
pub fn spawn_game(
    seed: Option<u64>,
    game_config: GameConfig,
    config: &EngineConfig,
) -> Result<(GameHandle, CommandSink, SnapshotSource), EngineError> {
    let game = Game::new(seed.unwrap_or_else(seed_from_clock), game_config)?;
    Ok(spawn(game, config))
}

/// Standard 18 x 10 board with seven piece kinds
pub fn spawn_standard(
    seed: Option<u64>,
    config: &EngineConfig,
) -> Result<(GameHandle, CommandSink, SnapshotSource), EngineError> {
    spawn_game(seed, GameConfig::standard(), config)
}

/// Bucket 10 x 3 board with a single one-cell piece
pub fn spawn_bucket(
    seed: Option<u64>,
    config: &EngineConfig,
) -> Result<(GameHandle, CommandSink, SnapshotSource), EngineError> {
    spawn_game(seed, GameConfig::bucket(), config)
}

async fn run(
    mut game: Game,
    mut commands: mpsc::Receiver<Command>,
    snapshots: broadcast::Sender<Snapshot>,
    gravity_interval: time::Duration,
) -> Snapshot {
    game.start();
    publish(&snapshots, &game);

    let mut gravity = time::interval_at(Instant::now() + gravity_interval, gravity_interval);
    gravity.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while !game.state().is_terminal() {
        let could_fall = game.accepts_gravity();

        tokio::select! {
            biased;

            command = commands.recv() => match command {
                Some(command) => {
                    game.apply(command);
                }
                // Every producer is gone: nothing can steer the game any more.
                None => {
                    game.apply(Command::Stop);
                }
            },
            _ = gravity.tick(), if could_fall => {
                game.tick();
            }
        }

        // Resuming starts a full gravity period rather than firing a stale tick.
        if !could_fall && game.accepts_gravity() {
            gravity.reset();
        }

        publish(&snapshots, &game);
    }

    game.snapshot()
}

fn publish(snapshots: &broadcast::Sender<Snapshot>, game: &Game) {
    // No subscribers left is fine; the game keeps going for command producers.
    let _ = snapshots.send(game.snapshot());
}
