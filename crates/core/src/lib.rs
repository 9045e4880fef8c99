//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the falling-block game and nothing else: no threads, no
//! timers, no I/O. The game loop in `blocktris-engine` owns a [`Game`] and drives it; every
//! other consumer only ever sees [`Snapshot`] copies.
//!
//! # Module Structure
//!
//! - [`catalog`]: authored 4x4 piece masks, four per kind
//! - [`field`]: bordered occupancy grid and row clearing
//! - [`collision`]: collision test and piece placement
//! - [`config`]: board/piece configuration and its validation
//! - [`game`]: the state machine (commands, gravity, lock, spawn, game over)
//! - [`rng`]: seeded generator for piece selection
//! - [`snapshot`]: independent copies of game state for consumers
//!
//! # Determinism
//!
//! The game's own RNG is the only source of randomness, so two games with the same seed and
//! the same command/tick sequence stay identical at every step.
//!
//! # Example
//!
//! ```
//! use blocktris_core::{Game, GameConfig};
//! use blocktris_types::{Command, LifecycleState};
//!
//! let mut game = Game::new(12345, GameConfig::standard()).unwrap();
//! game.start();
//!
//! game.apply(Command::MoveLeft);
//! game.apply(Command::Rotate);
//! game.tick();
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.state, LifecycleState::Running);
//! assert_eq!(snap.piece.row, 2);
//! ```

pub mod catalog;
pub mod collision;
pub mod config;
pub mod error;
pub mod field;
pub mod game;
pub mod rng;
pub mod snapshot;

pub use blocktris_types as types;

pub use catalog::{MaskCells, PieceCatalog, PieceMask, PieceRotations};
pub use collision::{collides, place};
pub use config::GameConfig;
pub use error::ConfigError;
pub use field::Field;
pub use game::{ActivePiece, Game};
pub use rng::{seed_from_clock, SimpleRng};
pub use snapshot::{CellView, Snapshot};
