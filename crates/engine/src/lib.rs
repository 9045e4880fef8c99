//! Game loop actor - single owner of a running game
//!
//! [`spawn`] moves a [`Game`](crate::core::Game) into its own tokio task and returns three
//! ends:
//!
//! - [`GameHandle`]: join, abort, or add snapshot subscribers
//! - [`CommandSink`]: cloneable producer end of the bounded command queue
//! - [`SnapshotSource`]: consumer end of the bounded snapshot broadcast
//!
//! # Ordering
//!
//! Each loop iteration applies exactly one event. When a command and a gravity tick are ready
//! together the command goes first.
//!
//! # Snapshot Overflow
//!
//! Publishing never waits. A subscriber more than `snapshot_capacity` snapshots behind loses
//! the oldest ones; [`SnapshotSource::dropped`] counts how many.
//!
//! # Shutdown
//!
//! The loop publishes its `GameOver` snapshot and exits. Afterwards sends fail with
//! [`EngineError::Closed`] and subscribers drain what is left, then see `None`. Dropping every
//! [`CommandSink`] counts as a `Stop`.

pub mod channels;
pub mod config;
pub mod error;
pub mod game_loop;

pub use blocktris_core as core;
pub use blocktris_types as types;

pub use channels::{CommandSink, SnapshotSource};
pub use config::EngineConfig;
pub use error::EngineError;
pub use game_loop::{spawn, spawn_bucket, spawn_game, spawn_standard, GameHandle};
